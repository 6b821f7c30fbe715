//! Comment types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted comment on a driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique identifier.
    pub id: Uuid,
    /// Driver the comment refers to.
    pub driver_id: Uuid,
    /// Comment author.
    pub author: String,
    /// Comment text.
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Driver the comment refers to.
    pub driver_id: Uuid,
    /// Comment author.
    pub author: String,
    /// Comment text.
    pub text: String,
}
