//! Dual-mode artifact storage using Apache OpenDAL.
//!
//! Uploaded files are persisted either to a local directory tree (development)
//! or to an S3-compatible object store (production). Both modes sit behind the
//! [`ArtifactStore`] capability, chosen once at startup and injected; callers
//! never branch on the deployment mode themselves.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        ArtifactStore                             │
//! │            store(upload, category) -> Artifact                   │
//! │            remove(artifact)        -> ()                         │
//! ├────────────────────────────┬────────────────────────────────────┤
//! │     LocalArtifactStore     │        RemoteArtifactStore         │
//! │     (OpenDAL Fs)           │        (OpenDAL S3)                │
//! └────────────────────────────┴────────────────────────────────────┘
//! ```

mod error;
mod local;
mod remote;
mod store;
mod types;

pub use error::StorageError;
pub use local::{LocalArtifactStore, LocalStoreConfig};
pub use remote::{RemoteArtifactStore, RemoteStoreConfig};
pub use store::{ArtifactStore, remove_all, store_all};
pub use types::{Artifact, FileCategory, FileUpload, RemovalOutcome, StoredFile};
