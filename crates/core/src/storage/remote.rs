//! Remote object-storage artifact store (production mode).

use async_trait::async_trait;
use opendal::{ErrorKind, Operator, services};
use uuid::Uuid;

use super::error::StorageError;
use super::store::ArtifactStore;
use super::types::{Artifact, FileCategory, FileUpload, file_extension};

/// Configuration for the remote store.
#[derive(Debug, Clone)]
pub struct RemoteStoreConfig {
    /// S3-compatible endpoint URL.
    pub endpoint: String,
    /// Bucket name.
    pub bucket: String,
    /// Access key id.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Region.
    pub region: String,
    /// Public base URL under which objects in the bucket resolve.
    pub public_url: String,
    /// Key prefix for every object written.
    pub folder: String,
}

/// Artifact store that streams in-memory buffers to an S3-compatible object
/// store and returns durable URLs plus opaque deletion handles.
pub struct RemoteArtifactStore {
    op: Operator,
    public_url: String,
    folder: String,
}

impl RemoteArtifactStore {
    /// Create a remote store for the configured bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if the S3 operator cannot be built.
    pub fn new(config: &RemoteStoreConfig) -> Result<Self, StorageError> {
        let builder = services::S3::default()
            .endpoint(&config.endpoint)
            .bucket(&config.bucket)
            .access_key_id(&config.access_key_id)
            .secret_access_key(&config.secret_access_key)
            .region(&config.region);

        let op = Operator::new(builder)
            .map_err(|e| StorageError::configuration(e.to_string()))?
            .finish();

        Ok(Self {
            op,
            public_url: config.public_url.trim_end_matches('/').to_string(),
            folder: config.folder.trim_matches('/').to_string(),
        })
    }

    /// Builds the object key for an upload.
    fn object_key(&self, upload: &FileUpload, category: FileCategory) -> String {
        format!(
            "{}/{}/{}{}",
            self.folder,
            category.dir(),
            Uuid::new_v4(),
            file_extension(&upload.filename)
        )
    }
}

#[async_trait]
impl ArtifactStore for RemoteArtifactStore {
    async fn store(
        &self,
        upload: &FileUpload,
        category: FileCategory,
    ) -> Result<Artifact, StorageError> {
        let key = self.object_key(upload, category);

        let mut write = self.op.write_with(&key, upload.bytes.clone());
        if let Some(content_type) = &upload.content_type {
            write = write.content_type(content_type);
        }
        write.await?;

        Ok(Artifact {
            url: format!("{}/{}", self.public_url, key),
            public_id: Some(key),
        })
    }

    async fn remove(&self, artifact: &Artifact) -> Result<(), StorageError> {
        let Some(key) = artifact.public_id.as_deref() else {
            return Err(StorageError::invalid_handle(format!(
                "artifact has no deletion handle: {}",
                artifact.url
            )));
        };
        match self.op.delete(key).await {
            Ok(()) => Ok(()),
            // an object that is already gone counts as removed
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
