//! The reference text every answer is grounded in.
//!
//! A [`ContentStore`] is built once at startup and never mutated afterwards;
//! clones share the same buffer.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read poetry book at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("poetry book at {path} is empty")]
    Empty { path: PathBuf },
}

#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    text: Option<Arc<str>>,
}

impl ContentStore {
    /// A store with no content. Every chat request against it reports
    /// not-ready.
    pub fn pending() -> Self {
        Self::default()
    }

    /// Reads the whole file and trims surrounding whitespace. A missing,
    /// unreadable, or blank file is an error; the caller is expected to treat
    /// it as fatal.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LoadError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let store = Self::from_text(&raw).ok_or_else(|| LoadError::Empty {
            path: path.to_path_buf(),
        })?;

        tracing::info!(
            path = %path.display(),
            bytes = store.text().map(str::len).unwrap_or_default(),
            "Poetry book loaded"
        );
        Ok(store)
    }

    /// Builds a ready store from in-memory text; `None` when the text is blank.
    pub fn from_text(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            text: Some(Arc::from(trimmed)),
        })
    }

    pub fn is_ready(&self) -> bool {
        self.text.is_some()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn load_trims_and_marks_ready() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\n\n## Poem 1: Echoes of Dawn\nLight on the water.\n\n  ").unwrap();

        let store = ContentStore::load(file.path()).await.unwrap();

        assert!(store.is_ready());
        assert_eq!(
            store.text(),
            Some("## Poem 1: Echoes of Dawn\nLight on the water.")
        );
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ContentStore::load(dir.path().join("nope.txt")).await;

        assert!(matches!(result, Err(LoadError::Read { .. })));
    }

    #[tokio::test]
    async fn blank_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "   \n\t\n").unwrap();

        let result = ContentStore::load(file.path()).await;

        assert!(matches!(result, Err(LoadError::Empty { .. })));
    }

    #[test]
    fn pending_store_is_not_ready() {
        let store = ContentStore::pending();
        assert!(!store.is_ready());
        assert_eq!(store.text(), None);
    }

    #[test]
    fn clones_share_the_text() {
        let store = ContentStore::from_text("verse").unwrap();
        let copy = store.clone();
        assert!(std::ptr::eq(
            store.text().unwrap().as_ptr(),
            copy.text().unwrap().as_ptr()
        ));
    }
}
