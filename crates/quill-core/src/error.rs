//! Domain-level error types.

use thiserror::Error;

use crate::domain::PostStatus;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Absent, or present but hidden from the viewer. The two cases are
    /// deliberately indistinguishable.
    #[error("{entity_type} not found")]
    NotFound { entity_type: &'static str },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Cannot {action} a post in status {from}")]
    InvalidTransition {
        from: PostStatus,
        action: &'static str,
    },

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Storage failure: {0}")]
    Storage(String),

    #[error("Upload failure: {0}")]
    Upload(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn post_not_found() -> Self {
        Self::NotFound {
            entity_type: "Post",
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => DomainError::post_not_found(),
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Storage(msg),
        }
    }
}
