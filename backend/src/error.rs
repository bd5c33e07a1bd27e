//! Application error handling
//!
//! Every fallible backend operation returns [`AppError`]. Storage failures are
//! recoverable: callers may log them and retry the write later.

use aiqo_shared::{DomainError, ValidationError};
use thiserror::Error;

/// Backend error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export error: {0}")]
    Export(#[from] csv::Error),
}

impl AppError {
    /// Whether retrying the same call later can succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Storage(_) | AppError::Database(_) | AppError::Io(_)
        )
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.user_message())
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(v) => v.into(),
            DomainError::NotFound(msg) => AppError::NotFound(msg),
        }
    }
}

/// Result type alias for backend operations
pub type AppResult<T> = Result<T, AppError>;
