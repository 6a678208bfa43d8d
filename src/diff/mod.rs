//! Diff engine for comparing two snapshots by row key

use crate::config::StatusLabels;
use crate::model::Table;

/// Header of the classification column appended to the diff table.
pub const STATUS_COLUMN: &str = "STATUS";

/// Marker joining the before and after values of a changed cell.
pub const CHANGE_ARROW: &str = "→";

/// Classification of a diff table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    /// Present in both snapshots with identical shared-column values.
    Unchanged,
    /// Present only in the new snapshot.
    Added,
    /// Present in both snapshots with at least one shared-column value
    /// differing.
    Changed,
    /// Present only in the old snapshot; cells carry the old values.
    Dropped,
}

impl RowStatus {
    /// Display text for the STATUS column. Unchanged rows stay blank.
    pub fn label<'a>(&self, labels: &'a StatusLabels) -> &'a str {
        match self {
            RowStatus::Unchanged => "",
            RowStatus::Added => &labels.added,
            RowStatus::Changed => &labels.changed,
            RowStatus::Dropped => &labels.dropped,
        }
    }
}

/// One row of the merged table, tagged with where it came from.
///
/// Cells are aligned to [`DiffTable::columns`] by position at construction
/// time, so renderers never have to reconcile old and new column layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRow {
    pub key: String,
    pub status: RowStatus,
    pub cells: Vec<String>,
}

/// The merged, annotated table produced by a comparison.
#[derive(Debug, Clone)]
pub struct DiffTable {
    pub key_column: String,
    /// Data columns: the new snapshot's columns in their own order, then
    /// any old-only columns when dropped rows carry values for them.
    /// STATUS is not listed; renderers append it last.
    pub columns: Vec<String>,
    /// Rows sorted by key, ascending.
    pub rows: Vec<DiffRow>,
}

/// Result of [`diff`]: the merged table plus the added and dropped keys in
/// discovery order.
#[derive(Debug, Clone)]
pub struct DiffOutcome {
    pub table: DiffTable,
    pub added_keys: Vec<String>,
    pub dropped_keys: Vec<String>,
}

impl DiffOutcome {
    pub fn changed_count(&self) -> usize {
        self.table
            .rows
            .iter()
            .filter(|r| r.status == RowStatus::Changed)
            .count()
    }

    pub fn has_changes(&self) -> bool {
        !self.added_keys.is_empty() || !self.dropped_keys.is_empty() || self.changed_count() > 0
    }
}

/// Compare two snapshots keyed by their index column.
///
/// Rows present in both are compared over the shared columns only; a
/// mismatch replaces the cell with `"<old>→<new>"` and marks the row
/// [`RowStatus::Changed`]. Rows only in `new` are [`RowStatus::Added`].
/// Rows only in `old` are appended with their old values as
/// [`RowStatus::Dropped`]. Columns present in just one snapshot are never
/// compared.
pub fn diff(old: &Table, new: &Table) -> DiffOutcome {
    let any_dropped = old.rows.keys().any(|key| !new.contains_key(key));

    // New's columns lead; old-only columns join only when a dropped row
    // would otherwise lose their values.
    let mut columns: Vec<String> = new.columns.clone();
    if any_dropped {
        for column in &old.columns {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
    }

    let new_positions: Vec<Option<usize>> =
        columns.iter().map(|c| new.column_index(c)).collect();
    let old_positions: Vec<Option<usize>> =
        columns.iter().map(|c| old.column_index(c)).collect();

    let mut rows = Vec::with_capacity(new.row_count() + old.row_count());
    let mut added_keys = Vec::new();

    for (key, cells) in &new.rows {
        match old.rows.get(key) {
            Some(old_cells) => {
                let mut changed = false;
                let merged: Vec<String> = columns
                    .iter()
                    .enumerate()
                    .map(|(i, _)| match (new_positions[i], old_positions[i]) {
                        (Some(n), Some(o)) => {
                            let value = &cells[n];
                            let old_value = &old_cells[o];
                            if value == old_value {
                                value.clone()
                            } else {
                                changed = true;
                                format!("{old_value}{CHANGE_ARROW}{value}")
                            }
                        }
                        (Some(n), None) => cells[n].clone(),
                        (None, _) => String::new(),
                    })
                    .collect();

                rows.push(DiffRow {
                    key: key.clone(),
                    status: if changed {
                        RowStatus::Changed
                    } else {
                        RowStatus::Unchanged
                    },
                    cells: merged,
                });
            }
            None => {
                added_keys.push(key.clone());
                rows.push(DiffRow {
                    key: key.clone(),
                    status: RowStatus::Added,
                    cells: new_positions
                        .iter()
                        .map(|p| p.map(|n| cells[n].clone()).unwrap_or_default())
                        .collect(),
                });
            }
        }
    }

    let mut dropped_keys = Vec::new();
    for (key, old_cells) in &old.rows {
        if new.contains_key(key) {
            continue;
        }
        dropped_keys.push(key.clone());
        rows.push(DiffRow {
            key: key.clone(),
            status: RowStatus::Dropped,
            cells: old_positions
                .iter()
                .map(|p| p.map(|o| old_cells[o].clone()).unwrap_or_default())
                .collect(),
        });
    }

    rows.sort_by(|a, b| a.key.cmp(&b.key));

    DiffOutcome {
        table: DiffTable {
            key_column: new.key_column.clone(),
            columns,
            rows,
        },
        added_keys,
        dropped_keys,
    }
}
