//! Shared types, errors, and configuration for Bluebird.
//!
//! This crate provides common types used across all other crates:
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, StorageMode, StorageSettings};
pub use error::{AppError, AppResult};
