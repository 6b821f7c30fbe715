//! Per-driver comments.
//!
//! Comments reference a driver by id but have an independent lifecycle; they
//! are not removed when the driver is deleted.

mod error;
mod service;
mod types;

pub use error::CommentError;
pub use service::{CommentRepository, CommentService};
pub use types::{Comment, NewComment};
