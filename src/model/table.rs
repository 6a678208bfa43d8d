//! Row-indexed table of string cells

use indexmap::IndexMap;

/// A loaded snapshot: ordered data columns plus rows addressed by key value.
///
/// Cell values are plain strings; absent values are the empty string, never a
/// null marker. Rows keep the order of the source file.
#[derive(Debug, Clone)]
pub struct Table {
    /// File stem of the source, used for sheet naming
    pub name: String,
    /// Name of the index column the rows are keyed by
    pub key_column: String,
    /// Data column names in source order, key column excluded
    pub columns: Vec<String>,
    /// Row key to cell values aligned with `columns`
    pub rows: IndexMap<String, Vec<String>>,
}

impl Table {
    /// Create an empty table with the given column layout.
    pub fn new(
        name: impl Into<String>,
        key_column: impl Into<String>,
        columns: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            key_column: key_column.into(),
            columns,
            rows: IndexMap::new(),
        }
    }

    /// Insert a row, padding or truncating the cells to the column count.
    ///
    /// Inserting an existing key replaces the previous row while keeping its
    /// position: the last occurrence wins, silently. Duplicate keys are a
    /// documented limitation of the input, not an error.
    pub fn insert_row(&mut self, key: String, mut cells: Vec<String>) {
        cells.resize(self.columns.len(), String::new());
        self.rows.insert(key, cells);
    }

    /// Get a data column's position by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Look up a single cell by row key and column name.
    pub fn cell(&self, key: &str, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows
            .get(key)
            .and_then(|cells| cells.get(idx))
            .map(String::as_str)
    }

    /// Whether a row with this key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of data columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
