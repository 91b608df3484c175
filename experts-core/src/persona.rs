//! Persona entity: a reusable expert identity.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from persona construction.
#[derive(Debug, Error)]
pub enum PersonaError {
    #[error("Generated persona text produced an empty title")]
    EmptyTitle,
}

/// A named expert identity used to frame generated answers.
///
/// Serialized with the legacy field names `agente` / `descricao` for
/// compatibility with existing store files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Short title, e.g. "Dr. Marina Costa, Marine Biologist".
    #[serde(rename = "agente")]
    pub title: String,

    /// Free-text description of the expert's qualifications.
    #[serde(rename = "descricao")]
    pub description: String,
}

impl Persona {
    /// Create a persona from explicit parts.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Split a generated persona-creation reply into title and description.
    ///
    /// The title is everything up to the first period, the description is
    /// the remainder; both are trimmed. A reply with no period becomes a
    /// title with an empty description. A reply that trims to an empty
    /// title is rejected.
    pub fn from_generated(text: &str) -> Result<Self, PersonaError> {
        let (title, description) = match text.find('.') {
            Some(idx) => (&text[..idx], &text[idx + 1..]),
            None => (text, ""),
        };

        let title = title.trim();
        if title.is_empty() {
            return Err(PersonaError::EmptyTitle);
        }

        Ok(Self {
            title: title.to_string(),
            description: description.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_first_period() {
        let persona = Persona::from_generated(
            "Dr. X, Quantum Chemist. A specialist in molecular orbital theory.",
        )
        .unwrap();

        assert_eq!(persona.title, "Dr");
        assert_eq!(
            persona.description,
            "X, Quantum Chemist. A specialist in molecular orbital theory."
        );
    }

    #[test]
    fn test_split_trims_both_parts() {
        let persona = Persona::from_generated("  Marine Biologist .  Studies reef ecosystems.  ")
            .unwrap();

        assert_eq!(persona.title, "Marine Biologist");
        assert_eq!(persona.description, "Studies reef ecosystems.");
    }

    #[test]
    fn test_no_period_becomes_whole_title() {
        let persona = Persona::from_generated("Structural Engineer").unwrap();

        assert_eq!(persona.title, "Structural Engineer");
        assert_eq!(persona.description, "");
    }

    #[test]
    fn test_empty_title_rejected() {
        assert!(matches!(
            Persona::from_generated(". Description without a title"),
            Err(PersonaError::EmptyTitle)
        ));
        assert!(matches!(
            Persona::from_generated("   "),
            Err(PersonaError::EmptyTitle)
        ));
    }

    #[test]
    fn test_legacy_field_names() {
        let persona = Persona::new("Dr. X", "desc");
        let json = serde_json::to_value(&persona).unwrap();

        assert_eq!(json["agente"], "Dr. X");
        assert_eq!(json["descricao"], "desc");
    }
}
