//! Configuration for comparison runs

use std::path::PathBuf;

use encoding_rs::Encoding;

/// Default field delimiter for delimited-text input.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Display strings written into the STATUS column.
///
/// The classification itself is the [`RowStatus`](crate::diff::RowStatus)
/// enum; these are only its rendered tokens, so deployments can swap in
/// localized labels without touching the diff semantics.
#[derive(Debug, Clone)]
pub struct StatusLabels {
    pub added: String,
    pub changed: String,
    pub dropped: String,
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self {
            added: "ADDED".to_string(),
            changed: "CHANGED".to_string(),
            dropped: "DROPPED".to_string(),
        }
    }
}

/// Fill and font styling for one highlight rule on the DIFF sheet.
#[derive(Debug, Clone, Copy)]
pub struct CellStyle {
    pub bold: bool,
    /// Font color as 0xRRGGBB
    pub font_color: u32,
    /// Fill color as 0xRRGGBB
    pub bg_color: u32,
}

/// The three highlight styles applied to the DIFF sheet.
#[derive(Debug, Clone, Copy)]
pub struct HighlightPalette {
    pub changed: CellStyle,
    pub added: CellStyle,
    pub dropped: CellStyle,
}

impl Default for HighlightPalette {
    fn default() -> Self {
        Self {
            changed: CellStyle {
                bold: true,
                font_color: 0xFF0000,
                bg_color: 0xB1B3B3,
            },
            added: CellStyle {
                bold: true,
                font_color: 0xFFFFFF,
                bg_color: 0x00AE00,
            },
            dropped: CellStyle {
                bold: true,
                font_color: 0xFFFFFF,
                bg_color: 0xFF0000,
            },
        }
    }
}

/// Configuration for one comparison run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the index column holding the row key
    pub index_column: String,
    /// Field delimiter for delimited-text input and output
    pub delimiter: u8,
    /// Encoding retried after auto-detection is rejected (text input only)
    pub fallback_encoding: &'static Encoding,
    /// For workbook input: sheet to load (default: first sheet)
    pub sheet: Option<String>,
    /// Directory the artifact is written to (default: current directory)
    pub output_dir: Option<PathBuf>,
    /// Display strings for the STATUS column
    pub labels: StatusLabels,
    /// Highlight styles for the DIFF sheet
    pub palette: HighlightPalette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_column: String::new(),
            delimiter: DEFAULT_DELIMITER,
            // encoding_rs unifies ISO-8859-1 with its windows-1252 superset
            fallback_encoding: encoding_rs::WINDOWS_1252,
            sheet: None,
            output_dir: None,
            labels: StatusLabels::default(),
            palette: HighlightPalette::default(),
        }
    }
}

impl Config {
    /// Create a config keyed on the given index column.
    pub fn new(index_column: impl Into<String>) -> Self {
        Self {
            index_column: index_column.into(),
            ..Default::default()
        }
    }

    /// Set the field delimiter for text input and output.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the fallback encoding for text input.
    pub fn with_fallback_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.fallback_encoding = encoding;
        self
    }

    /// Select a sheet by name for workbook input.
    pub fn with_sheet(mut self, name: impl Into<String>) -> Self {
        self.sheet = Some(name.into());
        self
    }

    /// Set the directory the artifact is written to.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Replace the STATUS display strings.
    pub fn with_status_labels(mut self, labels: StatusLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Replace the DIFF sheet highlight styles.
    pub fn with_palette(mut self, palette: HighlightPalette) -> Self {
        self.palette = palette;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_palette_replaces_the_defaults() {
        let palette = HighlightPalette {
            changed: CellStyle {
                bold: false,
                font_color: 0x000000,
                bg_color: 0xFFFF00,
            },
            ..HighlightPalette::default()
        };

        let config = Config::new("id").with_palette(palette);

        assert!(!config.palette.changed.bold);
        assert_eq!(config.palette.changed.bg_color, 0xFFFF00);
        assert_eq!(config.palette.added.bg_color, 0x00AE00);
    }
}
