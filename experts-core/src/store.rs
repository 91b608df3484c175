//! Persona persistence: a single JSON array on disk.
//!
//! The whole document is read and rewritten on every append. There is no
//! locking; the store assumes a single writer.

use crate::persona::Persona;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Errors from persona store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Persona store is corrupt: {0}")]
    Corrupt(String),
}

/// An ordered collection of personas backed by a JSON file.
#[derive(Debug, Clone)]
pub struct PersonaStore {
    path: PathBuf,
}

impl PersonaStore {
    /// Create a store backed by the given file path.
    ///
    /// The file is not created until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all personas in insertion order.
    ///
    /// An absent or zero-length file is an empty store. A file that is
    /// not a JSON array of persona records is `Corrupt`; the file is
    /// left untouched for the operator to inspect.
    pub async fn load(&self) -> Result<Vec<Persona>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let value: Value = serde_json::from_str(&content)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let Value::Array(items) = value else {
            return Err(StoreError::Corrupt(
                "expected a top-level JSON array".to_string(),
            ));
        };

        // Records missing either field are skipped rather than failing
        // the whole read.
        let personas = items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<Persona>(item).ok())
            .collect();

        Ok(personas)
    }

    /// All persona titles in insertion order.
    pub async fn titles(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.load().await?.into_iter().map(|p| p.title).collect())
    }

    /// Find a persona by exact title; first match wins.
    pub async fn find(&self, title: &str) -> Result<Option<Persona>, StoreError> {
        Ok(self.load().await?.into_iter().find(|p| p.title == title))
    }

    /// Append a persona and rewrite the whole document.
    ///
    /// A zero-length or absent file is treated as an empty list. A corrupt
    /// existing file is rebuilt in memory as empty and overwritten; the
    /// unreadable content is discarded. Read paths are where corruption is
    /// surfaced to the user.
    pub async fn append(&self, persona: Persona) -> Result<(), StoreError> {
        let mut personas = match self.load().await {
            Ok(personas) => personas,
            Err(StoreError::Corrupt(_)) => Vec::new(),
            Err(e) => return Err(e),
        };
        personas.push(persona);

        let content = serde_json::to_string_pretty(&personas)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> PersonaStore {
        PersonaStore::new(dir.path().join("agents.json"))
    }

    #[tokio::test]
    async fn test_load_absent_file() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);

        let personas = store.load().await.expect("load should succeed");
        assert!(personas.is_empty());
    }

    #[tokio::test]
    async fn test_append_then_list_preserves_order() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);

        store
            .append(Persona::new("Dr. A", "first"))
            .await
            .expect("append");
        store
            .append(Persona::new("Dr. B", "second"))
            .await
            .expect("append");

        let titles = store.titles().await.expect("titles");
        assert_eq!(titles, vec!["Dr. A", "Dr. B"]);

        let personas = store.load().await.expect("load");
        assert_eq!(personas[0].description, "first");
        assert_eq!(personas[1].description, "second");
    }

    #[tokio::test]
    async fn test_append_to_zero_byte_file() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        std::fs::write(store.path(), "").expect("touch file");

        store
            .append(Persona::new("Dr. X", "desc"))
            .await
            .expect("append");

        let personas = store.load().await.expect("load");
        assert_eq!(personas.len(), 1);
        assert_eq!(personas[0].title, "Dr. X");
    }

    #[tokio::test]
    async fn test_legacy_wire_format() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"[{"agente":"Dr. X","descricao":"desc"}]"#)
            .expect("seed file");

        let personas = store.load().await.expect("load");
        assert_eq!(personas, vec![Persona::new("Dr. X", "desc")]);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json").expect("seed file");

        assert!(matches!(store.load().await, Err(StoreError::Corrupt(_))));
    }

    #[tokio::test]
    async fn test_non_array_document_is_corrupt() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"agente":"Dr. X"}"#).expect("seed file");

        assert!(matches!(store.load().await, Err(StoreError::Corrupt(_))));
    }

    #[tokio::test]
    async fn test_append_over_corrupt_file_discards_old_content() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json").expect("seed file");

        store
            .append(Persona::new("Dr. X", "desc"))
            .await
            .expect("append");

        let personas = store.load().await.expect("load");
        assert_eq!(personas, vec![Persona::new("Dr. X", "desc")]);
    }

    #[tokio::test]
    async fn test_find_first_match_among_duplicates() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);

        store
            .append(Persona::new("Dr. X", "first entry"))
            .await
            .expect("append");
        store
            .append(Persona::new("Dr. X", "second entry"))
            .await
            .expect("append");

        let found = store.find("Dr. X").await.expect("find").expect("present");
        assert_eq!(found.description, "first entry");
    }

    #[tokio::test]
    async fn test_find_missing_title() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);

        let found = store.find("Nobody").await.expect("find");
        assert!(found.is_none());
    }
}
