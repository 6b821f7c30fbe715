//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for drivers and comments
//! - Multipart form handling for driver creation
//! - Static serving of the local upload root (local mode only)

pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use bluebird_core::storage::ArtifactStore;

/// Upload limits applied to driver creation requests.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    /// Maximum size of a single uploaded file in bytes.
    pub max_file_size: usize,
    /// Maximum number of files in one submission.
    pub max_files: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
            max_files: 40,
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Artifact store chosen at startup (local disk or remote object store).
    pub store: Arc<dyn ArtifactStore>,
    /// Upload limits.
    pub limits: UploadLimits,
    /// Upload root served under `/uploads` (local mode only).
    pub uploads_dir: Option<PathBuf>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    // room for every file at its cap plus the text fields
    let body_limit = state
        .limits
        .max_file_size
        .saturating_mul(state.limits.max_files)
        .saturating_add(1024 * 1024);

    let mut router = Router::new().nest("/api", routes::api_routes());

    if let Some(dir) = &state.uploads_dir {
        router = router.nest_service("/uploads", ServeDir::new(dir));
    }

    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
