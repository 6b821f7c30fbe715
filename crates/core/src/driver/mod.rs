//! Driver records: domain types, form assembly, lifecycle and cleanup.
//!
//! A driver is created from a multipart form submission whose files have
//! already been persisted through the artifact store; deleting a driver
//! removes every stored artifact (best-effort) before the database record.

mod assembler;
mod error;
mod service;
mod types;

pub use assembler::{assemble_driver, parse_json_field};
pub use error::DriverError;
pub use service::{DriverRepository, DriverService};
pub use types::{Driver, Host, NewDriver, Route, Shift, Waypoint};
