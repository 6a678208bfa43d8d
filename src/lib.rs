//! snapdiff - Snapshot comparison for tabular exports
//!
//! Compares two snapshots of the same dataset (Excel workbooks or
//! delimited text) keyed by a chosen index column, and writes an artifact
//! highlighting which rows were added, changed or dropped between them.

pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod run;

pub use config::{Config, HighlightPalette, StatusLabels};
pub use diff::{DiffOutcome, DiffTable, RowStatus};
pub use error::Error;
pub use model::Table;
pub use run::{csv_diff, excel_diff, CompareRun};
