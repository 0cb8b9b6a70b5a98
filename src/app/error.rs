//! Application-level errors

use super::cli::config::ConfigError;
use crate::core::error_handling::ContextualError;
use crate::producer::ProducerError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: ConfigError,
    },

    #[error(transparent)]
    Producer(#[from] ProducerError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for AppError {
    fn from(source: ConfigError) -> Self {
        AppError::Config {
            message: source.to_string(),
            source,
        }
    }
}

impl ContextualError for AppError {
    fn is_user_actionable(&self) -> bool {
        match self {
            AppError::Config { .. } => true,
            AppError::Producer(e) => e.is_user_actionable(),
            AppError::Store(e) => e.is_user_actionable(),
            AppError::Io(_) => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            AppError::Config { message, .. } => Some(message),
            AppError::Producer(e) => e.user_message(),
            AppError::Store(e) => e.user_message(),
            AppError::Io(_) => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
