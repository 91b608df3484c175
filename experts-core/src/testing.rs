//! Testing utilities for the persona pipeline.
//!
//! - `MockCompletion` scripts replies without API calls and records every
//!   prompt it receives
//! - `TestHarness` wires a session to a temp-dir store
//! - Assertion helpers for verifying notices

use crate::advisor::Advisor;
use crate::completion::{Completion, CompletionError};
use crate::persona::Persona;
use crate::session::{NoticeKind, Session, SessionConfig};
use crate::store::PersonaStore;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// A scripted reply from the mock backend.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text.
    Text(String),
    /// Fail with this message.
    Fail(String),
}

impl MockReply {
    /// Create a text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a failing reply.
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail(message.into())
    }
}

#[derive(Debug, Default)]
struct MockState {
    replies: Vec<MockReply>,
    reply_index: usize,
    prompts: Vec<String>,
}

/// A completion backend that returns scripted replies.
///
/// Clones share the script and the recorded prompts, so a harness can
/// keep a handle while the session owns the boxed backend.
#[derive(Clone, Default)]
pub struct MockCompletion {
    state: Arc<Mutex<MockState>>,
}

impl MockCompletion {
    /// Create a mock with scripted replies.
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                replies,
                reply_index: 0,
                prompts: Vec::new(),
            })),
        }
    }

    /// Queue another reply.
    pub fn queue(&self, reply: MockReply) {
        self.state.lock().unwrap().replies.push(reply);
    }

    /// Every prompt received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.state.lock().unwrap().prompts.clone()
    }

    /// Number of completion calls made.
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().prompts.len()
    }
}

#[async_trait]
impl Completion for MockCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let mut state = self.state.lock().unwrap();
        state.prompts.push(prompt.to_string());

        let reply = if state.reply_index < state.replies.len() {
            let r = state.replies[state.reply_index].clone();
            state.reply_index += 1;
            r
        } else {
            MockReply::text("The mock has no more scripted replies.")
        };

        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Fail(message) => Err(CompletionError::Unavailable(message)),
        }
    }
}

/// Test harness wiring a session to a temp-dir persona store.
pub struct TestHarness {
    /// The session under test.
    pub session: Session,
    /// Handle to the shared mock backend.
    pub mock: MockCompletion,
    store_path: std::path::PathBuf,
    _dir: TempDir,
}

impl TestHarness {
    /// Create a harness with an empty store and an empty script.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store_path = dir.path().join("agents.json");
        let mock = MockCompletion::default();
        let session = Session::with_completion(
            Box::new(mock.clone()),
            SessionConfig::new(&store_path),
        );

        Self {
            session,
            mock,
            store_path,
            _dir: dir,
        }
    }

    /// Queue a text reply.
    pub fn expect_reply(&mut self, text: impl Into<String>) -> &mut Self {
        self.mock.queue(MockReply::text(text));
        self
    }

    /// Queue a failing reply.
    pub fn expect_failure(&mut self, message: impl Into<String>) -> &mut Self {
        self.mock.queue(MockReply::fail(message));
        self
    }

    /// A store handle over the same backing file as the session's.
    pub fn store(&self) -> PersonaStore {
        PersonaStore::new(&self.store_path)
    }

    /// Seed the store with personas.
    pub async fn seed_personas(&self, personas: Vec<Persona>) {
        let store = self.store();
        for persona in personas {
            store.append(persona).await.expect("seed append");
        }
    }

    /// An advisor sharing the harness's mock and store, for tests that
    /// exercise the orchestrator without a session.
    pub fn advisor(&self) -> Advisor {
        Advisor::new(Box::new(self.mock.clone()), self.store())
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the session recorded exactly one error notice.
#[track_caller]
pub fn assert_single_error(session: &Session) {
    let errors: Vec<_> = session
        .notices()
        .iter()
        .filter(|n| n.kind == NoticeKind::Error)
        .collect();
    assert_eq!(
        errors.len(),
        1,
        "Expected exactly one error notice, got {:?}",
        session.notices()
    );
}

/// Assert the session recorded exactly one warning notice and no errors.
#[track_caller]
pub fn assert_single_warning(session: &Session) {
    let warnings = session
        .notices()
        .iter()
        .filter(|n| n.kind == NoticeKind::Warning)
        .count();
    let errors = session
        .notices()
        .iter()
        .filter(|n| n.kind == NoticeKind::Error)
        .count();
    assert_eq!(
        (warnings, errors),
        (1, 0),
        "Expected one warning and no errors, got {:?}",
        session.notices()
    );
}

/// Assert the session recorded no notices at all.
#[track_caller]
pub fn assert_no_notices(session: &Session) {
    assert!(
        session.notices().is_empty(),
        "Expected no notices, got {:?}",
        session.notices()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_scripted_replies_in_order() {
        let mock = MockCompletion::new(vec![
            MockReply::text("first"),
            MockReply::text("second"),
        ]);

        assert_eq!(mock.complete("a").await.unwrap(), "first");
        assert_eq!(mock.complete("b").await.unwrap(), "second");
        assert!(mock
            .complete("c")
            .await
            .unwrap()
            .contains("no more scripted"));
        assert_eq!(mock.prompts(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_mock_scripted_failure() {
        let mock = MockCompletion::new(vec![MockReply::fail("quota exceeded")]);

        let err = mock.complete("prompt").await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(mock.call_count(), 1);
    }
}
