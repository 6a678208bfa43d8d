//! Loading snapshot files into tables

mod csv;
pub mod encoding;
mod excel;

use std::path::Path;

use crate::config::Config;
use crate::error::Error;
use crate::model::Table;

pub use self::csv::CsvReader;
pub use self::excel::ExcelReader;

/// Input format of a snapshot pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Excel,
}

/// Trait for reading a snapshot file into a [`Table`].
pub trait TableReader {
    fn read(&self, path: &Path, config: &Config) -> Result<Table, Error>;
}

/// Load a snapshot with the reader for `format`.
pub fn load(path: &Path, format: FileFormat, config: &Config) -> Result<Table, Error> {
    match format {
        FileFormat::Csv => CsvReader.read(path, config),
        FileFormat::Excel => ExcelReader.read(path, config),
    }
}

/// Headers produced by headerless columns: blank, or the `Unnamed: N`
/// placeholder that pandas-based exporters write. Columns with such names
/// are dropped at load time; downstream consumers rely on this filter.
pub fn is_unnamed_column(name: &str) -> bool {
    name.trim().is_empty() || name.starts_with("Unnamed:")
}

/// File stem used for sheet naming and the artifact filename.
pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".to_string())
}

/// Assemble a [`Table`] from raw headers and records, shared by both readers.
///
/// The index column is located first and extracted from the data columns;
/// the unnamed filter only runs on what remains, so a key column whose name
/// happens to match the placeholder pattern still works. Ragged records are
/// padded with empty strings (or truncated) to the header width.
pub(crate) fn build_table(
    name: &str,
    key_column: &str,
    headers: &[String],
    records: Vec<Vec<String>>,
    path: &Path,
) -> Result<Table, Error> {
    let key_idx = headers
        .iter()
        .position(|h| h == key_column)
        .ok_or_else(|| Error::KeyColumnNotFound {
            column: key_column.to_string(),
            path: path.to_path_buf(),
        })?;

    let kept: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(i, h)| *i != key_idx && !is_unnamed_column(h))
        .map(|(i, _)| i)
        .collect();

    let columns: Vec<String> = kept.iter().map(|&i| headers[i].clone()).collect();
    let mut table = Table::new(name, key_column, columns);

    for record in records {
        let key = record.get(key_idx).cloned().unwrap_or_default();
        let cells: Vec<String> = kept
            .iter()
            .map(|&i| record.get(i).cloned().unwrap_or_default())
            .collect();
        table.insert_row(key, cells);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnamed_column_pattern() {
        assert!(is_unnamed_column(""));
        assert!(is_unnamed_column("   "));
        assert!(is_unnamed_column("Unnamed: 0"));
        assert!(is_unnamed_column("Unnamed: 12"));
        assert!(!is_unnamed_column("name"));
        assert!(!is_unnamed_column("unnamed"));
    }

    #[test]
    fn build_table_drops_unnamed_and_keeps_key() {
        let headers = vec![
            "id".to_string(),
            "x".to_string(),
            "Unnamed: 2".to_string(),
            "y".to_string(),
        ];
        let records = vec![vec![
            "A".to_string(),
            "1".to_string(),
            "junk".to_string(),
            "2".to_string(),
        ]];

        let table =
            build_table("t", "id", &headers, records, Path::new("t.csv")).unwrap();

        assert_eq!(table.columns, vec!["x".to_string(), "y".to_string()]);
        assert_eq!(table.cell("A", "x"), Some("1"));
        assert_eq!(table.cell("A", "y"), Some("2"));
    }

    #[test]
    fn build_table_missing_key_column() {
        let headers = vec!["x".to_string()];
        let err = build_table("t", "id", &headers, Vec::new(), Path::new("t.csv"))
            .unwrap_err();

        assert!(matches!(err, Error::KeyColumnNotFound { .. }));
        assert!(err.to_string().contains("key column 'id' not found"));
    }

    #[test]
    fn build_table_pads_short_records() {
        let headers = vec!["id".to_string(), "x".to_string(), "y".to_string()];
        let records = vec![vec!["A".to_string(), "1".to_string()]];

        let table =
            build_table("t", "id", &headers, records, Path::new("t.csv")).unwrap();

        assert_eq!(table.cell("A", "y"), Some(""));
    }
}
