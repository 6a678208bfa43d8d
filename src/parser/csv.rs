//! Delimited text reader

use std::path::Path;

use crate::config::Config;
use crate::error::Error;
use crate::model::Table;

use super::{build_table, encoding, file_stem, TableReader};

/// Reader for delimiter-separated snapshots.
pub struct CsvReader;

impl TableReader for CsvReader {
    fn read(&self, path: &Path, config: &Config) -> Result<Table, Error> {
        let decoded = encoding::read_to_string_with_fallback(path, config.fallback_encoding)?;
        if decoded.used_fallback {
            log::info!(
                "{}: decoded with fallback encoding {}",
                path.display(),
                decoded.encoding.name()
            );
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(config.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(decoded.text.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|source| Error::Csv {
                path: path.to_path_buf(),
                source,
            })?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|source| Error::Csv {
                path: path.to_path_buf(),
                source,
            })?;
            records.push(record.iter().map(|s| s.to_string()).collect());
        }

        build_table(&file_stem(path), &config.index_column, &headers, records, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::FileFormat;
    use std::fs;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_semicolon_delimited_file() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "stock.csv", "id;name;qty\nA;Bolt;10\nB;Nut;4\n");
        let config = Config::new("id");

        let table = crate::parser::load(&path, FileFormat::Csv, &config).unwrap();

        assert_eq!(table.name, "stock");
        assert_eq!(table.columns, vec!["name".to_string(), "qty".to_string()]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell("A", "qty"), Some("10"));
    }

    #[test]
    fn honors_configured_delimiter() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "t.csv", "id,name\nA,Bolt\n");
        let config = Config::new("id").with_delimiter(b',');

        let table = CsvReader.read(&path, &config).unwrap();

        assert_eq!(table.cell("A", "name"), Some("Bolt"));
    }

    #[test]
    fn decodes_latin1_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t.csv");
        // "descripció" in ISO-8859-1
        fs::write(&path, b"id;descripci\xf3\nA;ple\n").unwrap();
        let config = Config::new("id");

        let table = CsvReader.read(&path, &config).unwrap();

        assert_eq!(table.columns, vec!["descripció".to_string()]);
        assert_eq!(table.cell("A", "descripció"), Some("ple"));
    }

    #[test]
    fn loading_twice_yields_equal_tables() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "t.csv", "id;a;b\nA;1;2\nB;3;4\n");
        let config = Config::new("id");

        let first = CsvReader.read(&path, &config).unwrap();
        let second = CsvReader.read(&path, &config).unwrap();

        assert_eq!(first.columns, second.columns);
        assert_eq!(first.rows, second.rows);
    }

    #[test]
    fn pandas_style_placeholder_columns_are_dropped() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "t.csv", "id;Unnamed: 0;qty\nA;junk;10\n");
        let config = Config::new("id");

        let table = CsvReader.read(&path, &config).unwrap();

        assert_eq!(table.columns, vec!["qty".to_string()]);
        assert_eq!(table.cell("A", "qty"), Some("10"));
    }

    #[test]
    fn missing_index_column_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "t.csv", "name;qty\nBolt;10\n");
        let config = Config::new("id");

        let err = CsvReader.read(&path, &config).unwrap_err();

        assert!(matches!(err, Error::KeyColumnNotFound { .. }));
    }

    #[test]
    fn ragged_rows_are_padded() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "t.csv", "id;a;b\nA;1\nB;1;2;3\n");
        let config = Config::new("id");

        let table = CsvReader.read(&path, &config).unwrap();

        assert_eq!(table.cell("A", "b"), Some(""));
        assert_eq!(table.cell("B", "b"), Some("2"));
    }
}
