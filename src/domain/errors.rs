//! Domain errors for the telegraph system.

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by repositories and other domain collaborators.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Alert group not found: {0}")]
    AlertGroupNotFound(Uuid),

    #[error("Log record not found: {0}")]
    LogRecordNotFound(Uuid),

    #[error("Alert not found: {0}")]
    AlertNotFound(Uuid),

    #[error("Message not found: {0}")]
    MessageNotFound(Uuid),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
