//! Pipeline orchestrator.
//!
//! The `Advisor` sequences the completion calls for the three request
//! types: persona resolution plus answer generation, refinement, and
//! evaluation. It holds no interaction state; the calling session owns
//! the response chain.

use crate::completion::{Completion, CompletionError};
use crate::persona::{Persona, PersonaError};
use crate::prompts::{self, AnswerSlots, EvaluationSlots, PersonaSlots, RefineSlots};
use crate::store::{PersonaStore, StoreError};
use thiserror::Error;

/// Errors from advisor operations.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Selected persona not found in the store: {0}")]
    UnknownPersona(String),

    #[error("Malformed persona reply: {0}")]
    MalformedPersona(#[from] PersonaError),
}

/// Result of a fetch: the resolved persona plus the generated answer.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub persona: Persona,
    pub answer: String,
}

/// The pipeline orchestrator.
pub struct Advisor {
    completion: Box<dyn Completion>,
    store: PersonaStore,
}

impl Advisor {
    /// Create an advisor over a completion backend and a persona store.
    pub fn new(completion: Box<dyn Completion>, store: PersonaStore) -> Self {
        Self { completion, store }
    }

    /// The persona store this advisor persists to.
    pub fn store(&self) -> &PersonaStore {
        &self.store
    }

    /// Resolve or create a persona, then generate an answer.
    ///
    /// With no selection, a meta-prompt asks the model to invent an expert
    /// tailored to the question; the reply is split on its first period and
    /// the new persona is appended to the store. With a selection, the
    /// title is looked up exactly (first match); an absent title aborts the
    /// fetch and leaves the store unchanged.
    pub async fn fetch(
        &self,
        question: &str,
        notes: &str,
        selection: Option<&str>,
    ) -> Result<Fetched, AdvisorError> {
        let persona = match selection {
            None => {
                let prompt = prompts::persona_creation(&PersonaSlots { question, notes });
                let reply = self.completion.complete(&prompt).await?;
                let persona = Persona::from_generated(&reply)?;
                self.store.append(persona.clone()).await?;
                persona
            }
            Some(title) => self
                .store
                .find(title)
                .await?
                .ok_or_else(|| AdvisorError::UnknownPersona(title.to_string()))?,
        };

        let prompt = prompts::answer(&AnswerSlots {
            title: &persona.title,
            description: &persona.description,
            question,
            notes,
        });
        let answer = self.completion.complete(&prompt).await?;

        Ok(Fetched { persona, answer })
    }

    /// Request a critical revision of a prior answer.
    ///
    /// Precondition (enforced by the caller): an answer already exists.
    pub async fn refine(
        &self,
        title: &str,
        prior_answer: &str,
        question: &str,
        notes: &str,
        has_references: bool,
    ) -> Result<String, AdvisorError> {
        let prompt = prompts::refine(&RefineSlots {
            title,
            prior_answer,
            question,
            notes,
            has_references,
        });
        Ok(self.completion.complete(&prompt).await?)
    }

    /// Request a structured critique of an answer.
    ///
    /// Precondition (enforced by the caller): both an answer and a persona
    /// description exist.
    pub async fn evaluate(
        &self,
        description: &str,
        question: &str,
        answer: &str,
    ) -> Result<String, AdvisorError> {
        let prompt = prompts::evaluation(&EvaluationSlots {
            description,
            question,
            answer,
        });
        Ok(self.completion.complete(&prompt).await?)
    }
}
