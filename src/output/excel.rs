//! Spreadsheet artifact with highlighted diff sheet

use std::path::Path;

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};
use rustc_hash::FxHashSet;

use crate::config::{CellStyle, Config, HighlightPalette};
use crate::diff::{DiffOutcome, RowStatus, CHANGE_ARROW, STATUS_COLUMN};
use crate::error::Error;
use crate::model::Table;

use super::ArtifactWriter;

/// Name of the sheet holding the merged table.
const DIFF_SHEET: &str = "DIFF";

/// Excel's hard limit on sheet name length.
const MAX_SHEET_NAME: usize = 31;

/// Writes a workbook with three sheets: `DIFF`, the new snapshot, and the
/// old snapshot. Only the DIFF sheet carries STATUS and highlighting.
pub struct ExcelOutput;

impl ArtifactWriter for ExcelOutput {
    fn write(
        &self,
        outcome: &DiffOutcome,
        old: &Table,
        new: &Table,
        path: &Path,
        config: &Config,
    ) -> Result<(), Error> {
        let formats = DiffFormats::new(&config.palette);
        let mut namer = SheetNamer::new();
        let new_sheet = namer.assign(&new.name);
        let old_sheet = namer.assign(&old.name);

        let mut workbook = Workbook::new();
        write_diff_sheet(workbook.add_worksheet(), outcome, config, &formats)?;
        write_snapshot_sheet(workbook.add_worksheet(), &new_sheet, new, &formats.header)?;
        write_snapshot_sheet(workbook.add_worksheet(), &old_sheet, old, &formats.header)?;

        workbook.save(path)?;
        Ok(())
    }
}

struct DiffFormats {
    header: Format,
    changed: Format,
    added: Format,
    dropped: Format,
}

impl DiffFormats {
    fn new(palette: &HighlightPalette) -> Self {
        DiffFormats {
            header: Format::new().set_bold(),
            changed: style_format(&palette.changed),
            added: style_format(&palette.added),
            dropped: style_format(&palette.dropped),
        }
    }

    fn for_row(&self, status: RowStatus) -> Option<&Format> {
        match status {
            RowStatus::Added => Some(&self.added),
            RowStatus::Dropped => Some(&self.dropped),
            RowStatus::Unchanged | RowStatus::Changed => None,
        }
    }
}

fn style_format(style: &CellStyle) -> Format {
    let format = Format::new()
        .set_font_color(Color::RGB(style.font_color))
        .set_background_color(Color::RGB(style.bg_color));
    if style.bold {
        format.set_bold()
    } else {
        format
    }
}

fn write_diff_sheet(
    worksheet: &mut Worksheet,
    outcome: &DiffOutcome,
    config: &Config,
    formats: &DiffFormats,
) -> Result<(), XlsxError> {
    worksheet.set_name(DIFF_SHEET)?;

    let table = &outcome.table;
    worksheet.write_string_with_format(0, 0, &table.key_column, &formats.header)?;
    for (col, name) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16 + 1, name, &formats.header)?;
    }
    let status_col = table.columns.len() as u16 + 1;
    worksheet.write_string_with_format(0, status_col, STATUS_COLUMN, &formats.header)?;

    for (i, row) in table.rows.iter().enumerate() {
        let r = i as u32 + 1;
        let row_format = formats.for_row(row.status);
        write_cell(worksheet, r, 0, &row.key, row_format)?;
        for (col, value) in row.cells.iter().enumerate() {
            // A cell holding an old→new composite is highlighted as
            // changed even inside an added or dropped row.
            let format = if value.contains(CHANGE_ARROW) {
                Some(&formats.changed)
            } else {
                row_format
            };
            write_cell(worksheet, r, col as u16 + 1, value, format)?;
        }
        write_cell(
            worksheet,
            r,
            status_col,
            row.status.label(&config.labels),
            row_format,
        )?;
    }
    Ok(())
}

fn write_snapshot_sheet(
    worksheet: &mut Worksheet,
    name: &str,
    table: &Table,
    header: &Format,
) -> Result<(), XlsxError> {
    worksheet.set_name(name)?;

    worksheet.write_string_with_format(0, 0, &table.key_column, header)?;
    for (col, column) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16 + 1, column, header)?;
    }
    for (i, (key, cells)) in table.rows.iter().enumerate() {
        let r = i as u32 + 1;
        worksheet.write_string(r, 0, key)?;
        for (col, value) in cells.iter().enumerate() {
            worksheet.write_string(r, col as u16 + 1, value)?;
        }
    }
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &str,
    format: Option<&Format>,
) -> Result<(), XlsxError> {
    match format {
        Some(f) => worksheet.write_string_with_format(row, col, value, f)?,
        None => worksheet.write_string(row, col, value)?,
    };
    Ok(())
}

/// Assigns legal, unique sheet names to the snapshot sheets. `DIFF` is
/// reserved up front so a snapshot file named `diff` cannot collide with
/// the merged sheet.
struct SheetNamer {
    used: FxHashSet<String>,
}

impl SheetNamer {
    fn new() -> Self {
        let mut used = FxHashSet::default();
        used.insert(DIFF_SHEET.to_lowercase());
        SheetNamer { used }
    }

    fn assign(&mut self, stem: &str) -> String {
        let base = sanitize_sheet_name(stem);
        let mut candidate = base.clone();
        let mut n = 2;
        while !self.used.insert(candidate.to_lowercase()) {
            let suffix = format!(" ({n})");
            let keep = MAX_SHEET_NAME.saturating_sub(suffix.chars().count());
            candidate = format!("{}{}", truncate_chars(&base, keep), suffix);
            n += 1;
        }
        candidate
    }
}

/// Rewrite a file stem into a legal sheet name: forbidden characters
/// become underscores, surrounding apostrophes go, and the result is
/// capped at 31 characters.
fn sanitize_sheet_name(stem: &str) -> String {
    let cleaned: String = stem
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .collect();
    let cleaned = truncate_chars(cleaned.trim_matches('\''), MAX_SHEET_NAME);
    if cleaned.is_empty() {
        "sheet".to_string()
    } else {
        cleaned
    }
}

fn truncate_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}
