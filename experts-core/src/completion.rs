//! The completion seam between orchestration and the wire.
//!
//! `Completion` is the single operation the pipeline needs from a model
//! backend. `GroqCompletion` pins the fixed request shape: one system
//! instruction, one user message, top-p 1, no stop sequences, and a
//! per-model output token ceiling.

use crate::models;
use async_trait::async_trait;
use groq::{Groq, Message, Request};
use thiserror::Error;

/// The fixed system instruction sent with every completion call.
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant.";

/// Errors from a completion backend.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Groq API error: {0}")]
    Api(#[from] groq::Error),

    #[error("Completion backend unavailable: {0}")]
    Unavailable(String),
}

/// A backend that turns an assembled prompt into generated text.
#[async_trait]
pub trait Completion: Send + Sync {
    /// Complete the prompt and return the generated text verbatim.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Groq-backed completion with fixed sampling parameters.
#[derive(Clone)]
pub struct GroqCompletion {
    client: Groq,
    model: String,
    temperature: f32,
}

impl GroqCompletion {
    /// Create a backend for the given model and temperature.
    pub fn new(client: Groq, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            client,
            model: model.into(),
            temperature,
        }
    }

    /// Create a backend from the GROQ_API_KEY environment variable.
    pub fn from_env(model: impl Into<String>, temperature: f32) -> Result<Self, CompletionError> {
        Ok(Self::new(Groq::from_env()?, model, temperature))
    }

    /// The model identifier this backend sends.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Completion for GroqCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = Request::new(vec![Message::user(prompt)])
            .with_system(SYSTEM_INSTRUCTION)
            .with_model(&self.model)
            .with_max_tokens(models::max_tokens_for(&self.model))
            .with_temperature(self.temperature)
            .with_top_p(1.0);

        let response = self.client.complete(request).await?;
        Ok(response.text().to_string())
    }
}
