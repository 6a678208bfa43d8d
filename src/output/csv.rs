//! Delimited text artifact

use std::path::Path;

use crate::config::Config;
use crate::diff::{DiffOutcome, STATUS_COLUMN};
use crate::error::Error;
use crate::model::Table;

use super::ArtifactWriter;

/// Writes the diff table as delimited text, one record per row, STATUS
/// last. The input delimiter convention carries over to the output; no
/// styling, no snapshot copies.
pub struct CsvOutput;

impl ArtifactWriter for CsvOutput {
    fn write(
        &self,
        outcome: &DiffOutcome,
        _old: &Table,
        _new: &Table,
        path: &Path,
        config: &Config,
    ) -> Result<(), Error> {
        let wrap = |source: csv::Error| Error::WriteCsv {
            path: path.to_path_buf(),
            source,
        };

        let mut writer = csv::WriterBuilder::new()
            .delimiter(config.delimiter)
            .from_path(path)
            .map_err(wrap)?;

        let table = &outcome.table;
        let mut header: Vec<&str> = Vec::with_capacity(table.columns.len() + 2);
        header.push(&table.key_column);
        header.extend(table.columns.iter().map(String::as_str));
        header.push(STATUS_COLUMN);
        writer.write_record(&header).map_err(wrap)?;

        for row in &table.rows {
            let mut record: Vec<&str> = Vec::with_capacity(header.len());
            record.push(&row.key);
            record.extend(row.cells.iter().map(String::as_str));
            record.push(row.status.label(&config.labels));
            writer.write_record(&record).map_err(wrap)?;
        }

        writer.flush().map_err(|source| wrap(source.into()))?;
        Ok(())
    }
}
