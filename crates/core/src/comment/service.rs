//! Comment service implementation.

use std::sync::Arc;

use uuid::Uuid;

use super::error::CommentError;
use super::types::{Comment, NewComment};

/// Repository trait for comment persistence.
pub trait CommentRepository: Send + Sync {
    /// Create a new comment.
    fn create(
        &self,
        input: NewComment,
    ) -> impl std::future::Future<Output = Result<Comment, CommentError>> + Send;

    /// List comments for a driver, newest first.
    fn list_by_driver(
        &self,
        driver_id: Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Comment>, CommentError>> + Send;

    /// Delete comment by ID, reporting whether a record was removed.
    fn delete(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<bool, CommentError>> + Send;
}

/// Comment service.
pub struct CommentService<R: CommentRepository> {
    repo: Arc<R>,
}

impl<R: CommentRepository> CommentService<R> {
    /// Create a new comment service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Creates a comment after checking the required fields are present.
    ///
    /// # Errors
    ///
    /// Returns a validation error if author or text is empty, or a
    /// repository error if the write fails.
    pub async fn create(&self, input: NewComment) -> Result<Comment, CommentError> {
        if input.author.trim().is_empty() {
            return Err(CommentError::validation("author is required"));
        }
        if input.text.trim().is_empty() {
            return Err(CommentError::validation("text is required"));
        }
        self.repo.create(input).await
    }

    /// Lists a driver's comments, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn list_by_driver(&self, driver_id: Uuid) -> Result<Vec<Comment>, CommentError> {
        self.repo.list_by_driver(driver_id).await
    }

    /// Deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no comment with the id exists.
    pub async fn delete(&self, id: Uuid) -> Result<(), CommentError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(CommentError::not_found(id))
        }
    }
}
