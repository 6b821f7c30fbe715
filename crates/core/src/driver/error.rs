//! Driver error types.

use thiserror::Error;
use uuid::Uuid;

use crate::storage::StorageError;

/// Driver operation errors.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Driver not found.
    #[error("driver not found: {0}")]
    NotFound(Uuid),

    /// Upload storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl DriverError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound(id)
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<DriverError> for bluebird_shared::AppError {
    fn from(err: DriverError) -> Self {
        match err {
            DriverError::NotFound(id) => Self::NotFound(format!("driver {id}")),
            DriverError::Storage(e) => Self::Storage(e.to_string()),
            DriverError::Repository(msg) => Self::Database(msg),
        }
    }
}
