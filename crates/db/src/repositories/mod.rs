//! Repository implementations for data access.

pub mod comment;
pub mod driver;

pub use comment::CommentRepository;
pub use driver::DriverRepository;
