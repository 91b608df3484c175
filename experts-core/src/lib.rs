//! Expert persona Q&A pipeline.
//!
//! This crate provides:
//! - A persona store persisted as a single JSON array on disk
//! - Named prompt templates for the four pipeline stages
//! - A stateless advisor that drives the Groq completion endpoint
//! - An interaction session holding the response chain and notices
//!
//! # Quick Start
//!
//! ```ignore
//! use experts_core::{Session, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SessionConfig::new("agents.json");
//!     let mut session = Session::from_env(config)?;
//!
//!     session.fetch("How does photosynthesis store energy?", "").await;
//!     if let Some(answer) = session.answer() {
//!         println!("{answer}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod advisor;
pub mod completion;
pub mod models;
pub mod persona;
pub mod prompts;
pub mod session;
pub mod store;
pub mod testing;

// Primary public API
pub use advisor::{Advisor, AdvisorError, Fetched};
pub use completion::{Completion, CompletionError, GroqCompletion};
pub use persona::{Persona, PersonaError};
pub use session::{Notice, NoticeKind, Session, SessionConfig, SessionError};
pub use store::{PersonaStore, StoreError};
pub use testing::{MockCompletion, MockReply, TestHarness};
