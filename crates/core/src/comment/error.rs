//! Comment error types.

use thiserror::Error;
use uuid::Uuid;

/// Comment operation errors.
#[derive(Debug, Error)]
pub enum CommentError {
    /// Comment not found.
    #[error("comment not found: {0}")]
    NotFound(Uuid),

    /// Required field missing.
    #[error("validation error: {0}")]
    Validation(String),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl CommentError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound(id)
    }

    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<CommentError> for bluebird_shared::AppError {
    fn from(err: CommentError) -> Self {
        match err {
            CommentError::NotFound(id) => Self::NotFound(format!("comment {id}")),
            CommentError::Validation(msg) => Self::Validation(msg),
            CommentError::Repository(msg) => Self::Database(msg),
        }
    }
}
