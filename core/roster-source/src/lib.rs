//! FILENAME: core/roster-source/src/lib.rs
//! Roster Source Module
//!
//! Fetches schedule records for a date window, either from the remote JSON
//! endpoint or from a local file, and enforces the payload shape.

mod error;
mod payload;
mod source;
mod window;

pub use error::SourceError;
pub use payload::{parse_payload, records_from_value};
pub use source::{save_records, FileSource, RemoteSource, ScheduleSource, DEFAULT_TIMEOUT};
pub use window::{FetchWindow, DEFAULT_WINDOW_DAYS};
