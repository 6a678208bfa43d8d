//! Artifact writers for comparison results

mod csv;
mod excel;
pub mod report;

use std::path::Path;

use crate::config::Config;
use crate::diff::DiffOutcome;
use crate::error::Error;
use crate::model::Table;
use crate::parser::FileFormat;

pub use self::csv::CsvOutput;
pub use self::excel::ExcelOutput;

/// Trait for writing the comparison artifact.
pub trait ArtifactWriter {
    fn write(
        &self,
        outcome: &DiffOutcome,
        old: &Table,
        new: &Table,
        path: &Path,
        config: &Config,
    ) -> Result<(), Error>;
}

/// Artifact filename convention: `<old stem>_vs_<new stem>.<ext>`.
pub fn artifact_name(old: &Table, new: &Table, extension: &str) -> String {
    format!("{}_vs_{}.{}", old.name, new.name, extension)
}

/// Write the artifact for `format` at `path`.
pub fn render(
    outcome: &DiffOutcome,
    old: &Table,
    new: &Table,
    path: &Path,
    format: FileFormat,
    config: &Config,
) -> Result<(), Error> {
    match format {
        FileFormat::Csv => CsvOutput.write(outcome, old, new, path, config),
        FileFormat::Excel => ExcelOutput.write(outcome, old, new, path, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_name_uses_both_stems() {
        let old = Table::new("gener", "id", Vec::new());
        let new = Table::new("febrer", "id", Vec::new());

        assert_eq!(artifact_name(&old, &new, "xlsx"), "gener_vs_febrer.xlsx");
        assert_eq!(artifact_name(&old, &new, "csv"), "gener_vs_febrer.csv");
    }
}
