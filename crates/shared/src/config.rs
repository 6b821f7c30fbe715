//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Upload storage configuration.
    pub storage: StorageSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// Which store receives uploaded files.
///
/// The mode is resolved once at startup; every file field of every request
/// goes through the same store for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageMode {
    /// Files written under a local directory tree (development).
    Local,
    /// Files streamed to an S3-compatible object store (production).
    #[default]
    S3,
}

/// Upload storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Deployment mode. Absent means remote.
    #[serde(default)]
    pub mode: StorageMode,
    /// Root directory for local uploads.
    #[serde(default = "default_upload_root")]
    pub upload_root: String,
    /// Base URL prepended to locally stored file paths.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// S3-compatible endpoint URL.
    #[serde(default)]
    pub s3_endpoint: String,
    /// S3 bucket name.
    #[serde(default)]
    pub s3_bucket: String,
    /// S3 access key id.
    #[serde(default)]
    pub s3_access_key_id: String,
    /// S3 secret access key.
    #[serde(default)]
    pub s3_secret_access_key: String,
    /// S3 region.
    #[serde(default = "default_s3_region")]
    pub s3_region: String,
    /// Public base URL under which bucket objects resolve.
    #[serde(default)]
    pub s3_public_url: String,
    /// Key prefix for every object written to the bucket.
    #[serde(default = "default_s3_folder")]
    pub s3_folder: String,
    /// Maximum size of a single uploaded file in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,
    /// Maximum number of files accepted in one submission.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

fn default_upload_root() -> String {
    "./uploads".to_string()
}

fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_s3_region() -> String {
    "auto".to_string()
}

fn default_s3_folder() -> String {
    "bluebird_uploads".to_string()
}

fn default_max_file_size() -> usize {
    10 * 1024 * 1024
}

fn default_max_files() -> usize {
    40
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BLUEBIRD").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
