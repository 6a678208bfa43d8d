//! Error types for loading snapshots and writing artifacts

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a snapshot or writing the diff artifact.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured index column does not exist in the input file.
    #[error("key column '{column}' not found in {}", path.display())]
    KeyColumnNotFound { column: String, path: PathBuf },

    /// The input file could not be read at all.
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Both the detected encoding and the fallback were rejected.
    #[error("could not decode {} as {encoding}", path.display())]
    Decode { path: PathBuf, encoding: String },

    /// Delimited-text parsing failed for a reason other than encoding.
    #[error("failed to parse {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The workbook could not be opened or its sheet could not be read.
    #[error("failed to read workbook {}", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// The requested sheet name does not exist in the workbook.
    #[error("no sheet named '{name}' in {}", path.display())]
    SheetNotFound { name: String, path: PathBuf },

    /// The input contains no header row at all.
    #[error("no data in {}", path.display())]
    EmptySheet { path: PathBuf },

    /// Writing the delimited-text artifact failed.
    #[error("failed to write {}", path.display())]
    WriteCsv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Building or saving the workbook artifact failed.
    #[error("failed to write workbook")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
