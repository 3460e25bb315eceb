//! FILENAME: core/roster-engine/src/lib.rs
//! Work-shift roster core.
//!
//! Turns a flat list of shift-assignment records into filter options, a
//! filtered subset, and an employee x date pivot grid. Everything here is
//! pure and synchronous; fetching and rendering live in other crates.
//!
//! Layers:
//! - `definition`: Records and filter criteria (what the input IS)
//! - `options`: Sorted unique option sets per axis
//! - `filter`: The tri-predicate filter
//! - `store`: Full set + filtered subset holder
//! - `engine`: Grid builder (HOW we pivot)
//! - `view`: Grid model for the presentation layer (WHAT we display)
//! - `date_format`: Column header labels

pub mod definition;
pub mod options;
pub mod filter;
pub mod store;
pub mod engine;
pub mod view;
pub mod date_format;

pub use definition::*;
pub use options::*;
pub use filter::{apply_filter, record_matches};
pub use store::RecordStore;
pub use view::*;
pub use engine::{build_grid, classify_cell, classify_shift, format_cell_line, GridCalculator, SHIFT_MARKERS};
pub use date_format::{format_date_with_weekday, weekday_label, DateFormatter, WEEKDAY_LABELS};
