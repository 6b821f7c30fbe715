//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository implementations for the core domain traits
//! - Database migrations
//! - Connection helpers, including a single-flight lazily connected handle

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{CommentRepository, DriverRepository};

use sea_orm::{Database, DatabaseConnection, DbErr};
use tokio::sync::OnceCell;

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// A lazily connected database handle with single-flight initialization.
///
/// The first caller of [`SharedDb::get`] triggers the connection; concurrent
/// callers await the same in-flight attempt, and every later call reuses the
/// established connection. A failed attempt is not cached, so the next caller
/// retries.
pub struct SharedDb {
    url: String,
    conn: OnceCell<DatabaseConnection>,
}

impl SharedDb {
    /// Creates a handle for the given connection URL without connecting.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            conn: OnceCell::new(),
        }
    }

    /// Returns the shared connection, establishing it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub async fn get(&self) -> Result<&DatabaseConnection, DbErr> {
        self.conn
            .get_or_try_init(|| connect(&self.url))
            .await
    }
}
