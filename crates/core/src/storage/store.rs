//! The artifact store capability and aggregate operations over it.

use async_trait::async_trait;
use futures::future::try_join_all;

use super::error::StorageError;
use super::types::{Artifact, FileCategory, FileUpload, RemovalOutcome, StoredFile};

/// Persists uploaded files and removes them again.
///
/// One implementation is selected at startup from configuration and injected
/// everywhere as `Arc<dyn ArtifactStore>`; the choice is fixed for the process
/// lifetime and applies uniformly to every file of every request.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persists a single file under the given category and returns the
    /// resulting artifact.
    async fn store(
        &self,
        upload: &FileUpload,
        category: FileCategory,
    ) -> Result<Artifact, StorageError>;

    /// Removes a previously stored artifact.
    ///
    /// An artifact that is already gone is treated as successfully removed.
    async fn remove(&self, artifact: &Artifact) -> Result<(), StorageError>;
}

/// Stores every file of a submission, fanning the uploads out concurrently.
///
/// The aggregate fails if any individual upload fails; there is no partial
/// success at this layer. Result order matches input order.
///
/// # Errors
///
/// Returns the first upload error encountered.
pub async fn store_all(
    store: &dyn ArtifactStore,
    uploads: &[FileUpload],
) -> Result<Vec<StoredFile>, StorageError> {
    try_join_all(uploads.iter().map(|upload| async move {
        let category = FileCategory::from_field(&upload.field);
        let artifact = store.store(upload, category).await?;
        Ok(StoredFile {
            field: upload.field.clone(),
            artifact,
        })
    }))
    .await
}

/// Removes every artifact, best-effort.
///
/// Each removal is independent: one failure never prevents the remaining
/// attempts. The caller receives one outcome per artifact and decides what to
/// log or surface.
pub async fn remove_all(store: &dyn ArtifactStore, artifacts: &[Artifact]) -> Vec<RemovalOutcome> {
    let mut outcomes = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let result = store.remove(artifact).await;
        outcomes.push(RemovalOutcome {
            artifact: artifact.clone(),
            result,
        });
    }
    outcomes
}
