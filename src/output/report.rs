//! Textual run summary for the terminal

use std::io;

use termcolor::{Color, ColorSpec, WriteColor};

use crate::diff::DiffOutcome;

/// Print the comparison summary: counts first, then the added and dropped
/// keys. Keys are sorted here for readability; the outcome itself keeps
/// them in discovery order.
pub fn write_summary(outcome: &DiffOutcome, out: &mut dyn WriteColor) -> io::Result<()> {
    writeln!(
        out,
        "Summary: +{} added, -{} dropped, ~{} changed (out of {} rows)",
        outcome.added_keys.len(),
        outcome.dropped_keys.len(),
        outcome.changed_count(),
        outcome.table.rows.len()
    )?;

    if !outcome.has_changes() {
        writeln!(out, "No differences found.")?;
        return Ok(());
    }

    if !outcome.added_keys.is_empty() {
        let mut keys = outcome.added_keys.clone();
        keys.sort();
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(out, "Added rows ({}): {}", keys.len(), keys.join(", "))?;
        out.reset()?;
    }

    if !outcome.dropped_keys.is_empty() {
        let mut keys = outcome.dropped_keys.clone();
        keys.sort();
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        writeln!(out, "Dropped rows ({}): {}", keys.len(), keys.join(", "))?;
        out.reset()?;
    }

    Ok(())
}
