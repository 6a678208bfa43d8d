//! Excel workbook reader (xlsx, xls, ods)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::NaiveDateTime;

use crate::config::Config;
use crate::error::Error;
use crate::model::Table;

use super::{build_table, file_stem, TableReader};

/// Reader for Excel snapshots.
pub struct ExcelReader;

impl TableReader for ExcelReader {
    fn read(&self, path: &Path, config: &Config) -> Result<Table, Error> {
        let mut workbook = open_workbook_auto(path).map_err(|source| Error::Workbook {
            path: path.to_path_buf(),
            source,
        })?;

        let sheet_name = match config.sheet {
            Some(ref name) => {
                if !workbook.sheet_names().iter().any(|s| s == name) {
                    return Err(Error::SheetNotFound {
                        name: name.clone(),
                        path: path.to_path_buf(),
                    });
                }
                name.clone()
            }
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| Error::EmptySheet {
                    path: path.to_path_buf(),
                })?,
        };
        log::debug!("{}: reading sheet '{}'", path.display(), sheet_name);

        let range: Range<Data> =
            workbook
                .worksheet_range(&sheet_name)
                .map_err(|source| Error::Workbook {
                    path: path.to_path_buf(),
                    source,
                })?;

        read_range(&range, path, config)
    }
}

fn read_range(range: &Range<Data>, path: &Path, config: &Config) -> Result<Table, Error> {
    let mut rows = range.rows();
    let header_row = rows.next().ok_or_else(|| Error::EmptySheet {
        path: path.to_path_buf(),
    })?;

    let headers: Vec<String> = header_row.iter().map(cell_to_string).collect();
    let records: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    build_table(&file_stem(path), &config.index_column, &headers, records, path)
}

/// Render a workbook cell as text. Dates come back as `ExcelDateTime`
/// serial values; the chrono conversion turns them into readable
/// timestamps before comparison.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(format_datetime)
            .unwrap_or_else(|| dt.to_string()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#{:?}", e),
    }
}

/// Second precision is enough here; serial-number conversion leaves
/// sub-second float noise that would otherwise show up in the diff.
fn format_datetime(d: NaiveDateTime) -> String {
    d.format("%Y-%m-%d %H:%M:%S").to_string()
}
