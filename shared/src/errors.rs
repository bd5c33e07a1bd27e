//! Error types for the AIQO domain

use thiserror::Error;

use crate::validation::ValidationError;

/// Domain error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {}", .0.user_message())]
    Validation(ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::Validation(err)
    }
}
