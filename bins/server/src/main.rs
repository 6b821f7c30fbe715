//! Bluebird API Server
//!
//! Main entry point for the Bluebird backend service.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bluebird_api::{AppState, UploadLimits, create_router};
use bluebird_core::storage::{
    ArtifactStore, LocalArtifactStore, LocalStoreConfig, RemoteArtifactStore, RemoteStoreConfig,
};
use bluebird_db::SharedDb;
use bluebird_shared::{AppConfig, StorageMode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bluebird=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let shared_db = SharedDb::new(&config.database.url);
    let db = shared_db.get().await?.clone();
    info!("Connected to database");

    // Select the artifact store for the lifetime of the process
    let storage = &config.storage;
    let (store, uploads_dir): (Arc<dyn ArtifactStore>, Option<PathBuf>) = match storage.mode {
        StorageMode::Local => {
            let root = PathBuf::from(&storage.upload_root);
            let store = LocalArtifactStore::new(&LocalStoreConfig {
                root: root.clone(),
                base_url: storage.base_url.clone(),
            })?;
            store.ensure_layout().await?;
            info!(root = %root.display(), "Local upload store ready");
            (Arc::new(store), Some(root))
        }
        StorageMode::S3 => {
            let store = RemoteArtifactStore::new(&RemoteStoreConfig {
                endpoint: storage.s3_endpoint.clone(),
                bucket: storage.s3_bucket.clone(),
                access_key_id: storage.s3_access_key_id.clone(),
                secret_access_key: storage.s3_secret_access_key.clone(),
                region: storage.s3_region.clone(),
                public_url: storage.s3_public_url.clone(),
                folder: storage.s3_folder.clone(),
            })?;
            info!(bucket = %storage.s3_bucket, "Remote upload store ready");
            (Arc::new(store), None)
        }
    };

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        store,
        limits: UploadLimits {
            max_file_size: storage.max_file_size,
            max_files: storage.max_files,
        },
        uploads_dir,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
