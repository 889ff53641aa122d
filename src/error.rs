//! Error types for the entry store and its persistence.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// An entry with this title already exists in the store.
    #[error("an entry titled '{0}' already exists")]
    DuplicateTitle(String),

    /// No entry matches the given id or title.
    #[error("entry not found: {0}")]
    NotFound(String),

    /// The entries file exists but is not a flat mapping of title to content.
    #[error("entries file {} is corrupt: {reason}", .path.display())]
    CorruptData { path: PathBuf, reason: String },

    /// Reading or writing the entries file failed.
    #[error("failed to access entries file {}: {source}", .path.display())]
    PersistenceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PersistenceIo {
            path: path.into(),
            source,
        }
    }

    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CorruptData {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptData { .. })
    }
}
