//! Producer Error Types

use crate::core::error_handling::ContextualError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ProducerError {
    #[error("{message}")]
    InvalidCapacity { capacity: i64, message: String },

    #[error("State store failed: {0}")]
    Store(#[from] StoreError),

    #[error("State lock poisoned: {message}")]
    LockPoisoned { message: String },
}

impl ProducerError {
    pub fn invalid_capacity(capacity: i64) -> Self {
        Self::InvalidCapacity {
            capacity,
            message: format!("capacity must be non-negative, got {}", capacity),
        }
    }
}

impl ContextualError for ProducerError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ProducerError::InvalidCapacity { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ProducerError::InvalidCapacity { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Result type for producer operations
pub type ProducerResult<T> = Result<T, ProducerError>;
