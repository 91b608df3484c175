//! Integration tests that call the real Groq API.
//!
//! These require GROQ_API_KEY to be set (via .env file or environment).
//! Run with: `cargo test -p experts-core --test api_integration -- --ignored`
//!
//! Marked #[ignore] by default to avoid API costs, failures without a key,
//! and slow runs in CI.

use experts_core::{Session, SessionConfig};
use tempfile::TempDir;

/// Load environment variables from .env file
fn setup() {
    let _ = dotenvy::dotenv();
}

/// Check if API key is available
fn has_api_key() -> bool {
    std::env::var("GROQ_API_KEY").is_ok()
}

#[tokio::test]
#[ignore] // Run with: cargo test -p experts-core --test api_integration -- --ignored
async fn test_auto_generated_persona_answers_a_question() {
    setup();
    if !has_api_key() {
        eprintln!("Skipping test: GROQ_API_KEY not set");
        return;
    }

    let dir = TempDir::new().expect("temp dir");
    let config = SessionConfig::new(dir.path().join("agents.json")).with_temperature(0.3);
    let mut session = Session::from_env(config).expect("session");

    let (title, answer) = session
        .fetch("What causes ocean tides?", "Answer in two paragraphs.", None)
        .await;

    assert!(!title.is_empty(), "expected a generated persona title");
    assert!(!answer.is_empty(), "expected a generated answer");
    assert!(session.notices().is_empty(), "{:?}", session.notices());

    // The generated persona must have been persisted.
    let choices = session.persona_choices().await;
    assert!(choices.contains(&title));
}

#[tokio::test]
#[ignore]
async fn test_refinement_builds_on_the_first_answer() {
    setup();
    if !has_api_key() {
        eprintln!("Skipping test: GROQ_API_KEY not set");
        return;
    }

    let dir = TempDir::new().expect("temp dir");
    let config = SessionConfig::new(dir.path().join("agents.json")).with_temperature(0.3);
    let mut session = Session::from_env(config).expect("session");

    session
        .fetch("Why do leaves change color in autumn?", "", None)
        .await;
    let refined = session.refine(false).await;

    assert!(!refined.is_empty(), "expected a refined answer");
    assert!(session.notices().is_empty(), "{:?}", session.notices());
}
