//! Data model for loaded snapshots

mod table;

pub use table::Table;
