//! Store Error Types

use crate::core::error_handling::ContextualError;
use crate::store::codec::DecodeError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store contents could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt value under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: DecodeError,
    },

    #[error("Store lock poisoned: {message}")]
    LockPoisoned { message: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl ContextualError for StoreError {
    fn is_user_actionable(&self) -> bool {
        false
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
