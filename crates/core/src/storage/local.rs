//! Local filesystem artifact store (development mode).

use std::path::PathBuf;

use async_trait::async_trait;
use opendal::{ErrorKind, Operator, services};
use uuid::Uuid;

use super::error::StorageError;
use super::store::ArtifactStore;
use super::types::{Artifact, FileCategory, FileUpload, file_extension};

/// Configuration for the local store.
#[derive(Debug, Clone)]
pub struct LocalStoreConfig {
    /// Directory all uploads live under.
    pub root: PathBuf,
    /// Base URL the upload root is served from.
    pub base_url: String,
}

/// Artifact store that writes files under a category-specific local
/// directory tree and derives public URLs from a configured base URL.
pub struct LocalArtifactStore {
    op: Operator,
    url_prefix: String,
}

impl LocalArtifactStore {
    /// Create a local store rooted at the configured upload directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the filesystem operator cannot be built.
    pub fn new(config: &LocalStoreConfig) -> Result<Self, StorageError> {
        let root = config
            .root
            .to_str()
            .ok_or_else(|| StorageError::configuration("invalid upload root path"))?;
        let builder = services::Fs::default().root(root);
        let op = Operator::new(builder)
            .map_err(|e| StorageError::configuration(e.to_string()))?
            .finish();

        Ok(Self {
            op,
            url_prefix: format!("{}/uploads/", config.base_url.trim_end_matches('/')),
        })
    }

    /// Creates every category directory under the upload root.
    ///
    /// Idempotent; called once at startup so the static file server has the
    /// full layout even before the first upload.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub async fn ensure_layout(&self) -> Result<(), StorageError> {
        for category in FileCategory::all() {
            self.op.create_dir(&format!("{}/", category.dir())).await?;
        }
        Ok(())
    }

    /// Resolves a public URL back to its path relative to the upload root.
    fn relative_path<'a>(&self, url: &'a str) -> Result<&'a str, StorageError> {
        url.strip_prefix(&self.url_prefix)
            .ok_or_else(|| StorageError::invalid_handle(format!("not a local upload URL: {url}")))
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn store(
        &self,
        upload: &FileUpload,
        category: FileCategory,
    ) -> Result<Artifact, StorageError> {
        let name = format!("{}{}", Uuid::new_v4(), file_extension(&upload.filename));
        let rel = format!("{}/{}", category.dir(), name);

        self.op.write(&rel, upload.bytes.clone()).await?;

        Ok(Artifact {
            url: format!("{}{}", self.url_prefix, rel),
            public_id: None,
        })
    }

    async fn remove(&self, artifact: &Artifact) -> Result<(), StorageError> {
        let rel = self.relative_path(&artifact.url)?;
        match self.op.delete(rel).await {
            Ok(()) => Ok(()),
            // a file that is already gone counts as removed
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> LocalArtifactStore {
        LocalArtifactStore::new(&LocalStoreConfig {
            root: dir.path().to_path_buf(),
            base_url: "http://localhost:4000".to_string(),
        })
        .unwrap()
    }

    fn upload(field: &str, filename: &str) -> FileUpload {
        FileUpload {
            field: field.to_string(),
            filename: filename.to_string(),
            content_type: Some("image/png".to_string()),
            bytes: Bytes::from_static(b"fake image bytes"),
        }
    }

    #[tokio::test]
    async fn test_store_writes_under_category_dir() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let artifact = store
            .store(&upload("personalImage", "me.png"), FileCategory::Personal)
            .await
            .unwrap();

        assert!(
            artifact
                .url
                .starts_with("http://localhost:4000/uploads/personal/")
        );
        assert!(artifact.url.ends_with(".png"));
        assert!(artifact.public_id.is_none());

        let entries: Vec<_> = std::fs::read_dir(dir.path().join("personal"))
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_url_roundtrip_removes_the_written_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let artifact = store
            .store(&upload("carImage", "car.jpg"), FileCategory::CarImages)
            .await
            .unwrap();
        let on_disk: Vec<_> = std::fs::read_dir(dir.path().join("car_images"))
            .unwrap()
            .collect();
        assert_eq!(on_disk.len(), 1);

        store.remove(&artifact).await.unwrap();

        let after: Vec<_> = std::fs::read_dir(dir.path().join("car_images"))
            .unwrap()
            .collect();
        assert!(after.is_empty());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let artifact = store
            .store(&upload("idCard", "id.png"), FileCategory::IdCards)
            .await
            .unwrap();

        store.remove(&artifact).await.unwrap();
        // second removal of the same artifact must not be an error
        store.remove(&artifact).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_rejects_foreign_url() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let artifact = Artifact {
            url: "https://elsewhere.example/uploads/personal/x.png".to_string(),
            public_id: None,
        };

        let err = store.remove(&artifact).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidHandle(_)));
    }

    #[tokio::test]
    async fn test_ensure_layout_creates_all_category_dirs() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.ensure_layout().await.unwrap();
        store.ensure_layout().await.unwrap(); // idempotent

        for category in FileCategory::all() {
            assert!(dir.path().join(category.dir()).is_dir());
        }
    }

    #[tokio::test]
    async fn test_distinct_uploads_never_collide() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        for _ in 0..10 {
            store
                .store(&upload("carImage", "same-name.png"), FileCategory::CarImages)
                .await
                .unwrap();
        }

        let entries: Vec<_> = std::fs::read_dir(dir.path().join("car_images"))
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 10);
    }
}
