//! Interaction session: the state the presentation shell owns.
//!
//! A `Session` wraps the stateless `Advisor` with the per-interaction
//! response chain and a user-visible notice log. Each operation records
//! exactly one notice on failure and leaves empty-string sentinels in
//! place of the missing text; nothing is retried and no failure is fatal
//! to the session.

use crate::advisor::{Advisor, AdvisorError};
use crate::completion::{Completion, CompletionError, GroqCompletion};
use crate::models;
use crate::store::{PersonaStore, StoreError};
use std::path::PathBuf;
use thiserror::Error;

/// The placeholder selector option meaning "no persona chosen yet".
pub const PERSONA_SENTINEL: &str = "Choose a specialist...";

/// Errors from session construction.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No API key configured - set GROQ_API_KEY environment variable")]
    NoApiKey,
}

/// Configuration for a new session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Path of the persona store file.
    pub store_path: PathBuf,

    /// Model identifier for completion calls.
    pub model: String,

    /// Sampling temperature (0.0 - 1.0).
    pub temperature: f32,
}

impl SessionConfig {
    /// Create a config with the default model and temperature.
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            model: models::DEFAULT_MODEL.to_string(),
            temperature: 0.5,
        }
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Warning,
}

/// A user-visible message recorded by a session operation.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// A single operator's interaction with the pipeline.
pub struct Session {
    advisor: Advisor,
    question: String,
    notes: String,
    title: String,
    description: String,
    answer: Option<String>,
    refined: Option<String>,
    evaluation: Option<String>,
    notices: Vec<Notice>,
}

impl Session {
    /// Create a session over an advisor.
    pub fn new(advisor: Advisor) -> Self {
        Self {
            advisor,
            question: String::new(),
            notes: String::new(),
            title: String::new(),
            description: String::new(),
            answer: None,
            refined: None,
            evaluation: None,
            notices: Vec::new(),
        }
    }

    /// Create a session from the GROQ_API_KEY environment variable.
    pub fn from_env(config: SessionConfig) -> Result<Self, SessionError> {
        let completion = GroqCompletion::from_env(config.model, config.temperature)
            .map_err(|_| SessionError::NoApiKey)?;
        let store = PersonaStore::new(config.store_path);
        Ok(Self::new(Advisor::new(Box::new(completion), store)))
    }

    /// Create a session with an explicit completion backend.
    ///
    /// Used by tests to avoid API calls.
    pub fn with_completion(completion: Box<dyn Completion>, config: SessionConfig) -> Self {
        let store = PersonaStore::new(config.store_path);
        Self::new(Advisor::new(completion, store))
    }

    /// Persona selector options: the sentinel placeholder followed by the
    /// stored titles in insertion order.
    ///
    /// A corrupt store is reported once and treated as empty.
    pub async fn persona_choices(&mut self) -> Vec<String> {
        let mut choices = vec![PERSONA_SENTINEL.to_string()];
        match self.advisor.store().titles().await {
            Ok(titles) => choices.extend(titles),
            Err(e) => self.error(format!("Could not read the persona store: {e}")),
        }
        choices
    }

    /// Fetch an answer, resolving or creating the persona first.
    ///
    /// `selection` is the selector value; the sentinel (or `None`) means
    /// auto-generate a persona. Clears any refined answer or evaluation
    /// from a previous fetch. Returns `(title, answer)`, both empty on
    /// failure.
    pub async fn fetch(
        &mut self,
        question: &str,
        notes: &str,
        selection: Option<&str>,
    ) -> (String, String) {
        // A new fetch resets the chain.
        self.title.clear();
        self.description.clear();
        self.answer = None;
        self.refined = None;
        self.evaluation = None;

        self.question = question.to_string();
        self.notes = notes.to_string();

        let selection = selection.filter(|s| *s != PERSONA_SENTINEL);

        match self.advisor.fetch(question, notes, selection).await {
            Ok(fetched) => {
                self.title = fetched.persona.title;
                self.description = fetched.persona.description;
                self.answer = Some(fetched.answer.clone());
                (self.title.clone(), fetched.answer)
            }
            Err(e) => {
                self.report_advisor_error(&e);
                (String::new(), String::new())
            }
        }
    }

    /// Refine the fetched answer.
    ///
    /// Precondition: an answer exists; otherwise a warning is recorded and
    /// no completion call is made. Returns the refined text, empty on
    /// failure.
    pub async fn refine(&mut self, has_references: bool) -> String {
        let Some(answer) = self.answer.clone() else {
            self.warn("Fetch an answer before requesting a refinement.");
            return String::new();
        };

        match self
            .advisor
            .refine(&self.title, &answer, &self.question, &self.notes, has_references)
            .await
        {
            Ok(refined) => {
                self.refined = Some(refined.clone());
                refined
            }
            Err(e) => {
                self.report_advisor_error(&e);
                String::new()
            }
        }
    }

    /// Evaluate the fetched answer against the persona description.
    ///
    /// Precondition: both an answer and a persona description exist;
    /// otherwise a warning is recorded and no completion call is made.
    /// Returns the evaluation text, empty on failure.
    pub async fn evaluate(&mut self) -> String {
        let (Some(answer), false) = (self.answer.clone(), self.description.is_empty()) else {
            self.warn("Fetch an answer with a described persona before requesting an evaluation.");
            return String::new();
        };

        match self
            .advisor
            .evaluate(&self.description, &self.question, &answer)
            .await
        {
            Ok(evaluation) => {
                self.evaluation = Some(evaluation.clone());
                evaluation
            }
            Err(e) => {
                self.report_advisor_error(&e);
                String::new()
            }
        }
    }

    /// Clear the whole interaction, notices included.
    pub fn reset(&mut self) {
        self.question.clear();
        self.notes.clear();
        self.title.clear();
        self.description.clear();
        self.answer = None;
        self.refined = None;
        self.evaluation = None;
        self.notices.clear();
    }

    /// The resolved persona title; empty when no fetch has succeeded.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The resolved persona description; empty when no fetch has succeeded.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The fetched answer, if any.
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    /// The refined answer, if any.
    pub fn refined(&self) -> Option<&str> {
        self.refined.as_deref()
    }

    /// The evaluation, if any.
    pub fn evaluation(&self) -> Option<&str> {
        self.evaluation.as_deref()
    }

    /// Notices recorded since the last reset.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain the notice log, returning the recorded notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn report_advisor_error(&mut self, e: &AdvisorError) {
        let message = match e {
            AdvisorError::UnknownPersona(title) => {
                format!("Selected specialist '{title}' was not found in the store.")
            }
            AdvisorError::Store(StoreError::Corrupt(detail)) => {
                format!("The persona store could not be read: {detail}")
            }
            AdvisorError::Completion(CompletionError::Api(api)) => {
                format!("The completion service reported an error: {api}")
            }
            other => format!("An error occurred: {other}"),
        };
        self.error(message);
    }

    fn error(&mut self, message: impl Into<String>) {
        self.notices.push(Notice {
            kind: NoticeKind::Error,
            message: message.into(),
        });
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.notices.push(Notice {
            kind: NoticeKind::Warning,
            message: message.into(),
        });
    }
}
