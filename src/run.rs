//! Driver operations tying loader, differencer and renderer together

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::diff::{self, DiffOutcome};
use crate::output;
use crate::parser::{self, FileFormat};

/// Result of one comparison run: the computed outcome plus where the
/// artifact landed.
#[derive(Debug)]
pub struct CompareRun {
    pub outcome: DiffOutcome,
    pub output_path: PathBuf,
}

/// Compare two Excel snapshots and write an xlsx artifact.
pub fn excel_diff(old_path: &Path, new_path: &Path, config: &Config) -> Result<CompareRun> {
    run(old_path, new_path, FileFormat::Excel, "xlsx", config)
}

/// Compare two delimited-text snapshots and write a csv artifact.
pub fn csv_diff(old_path: &Path, new_path: &Path, config: &Config) -> Result<CompareRun> {
    run(old_path, new_path, FileFormat::Csv, "csv", config)
}

fn run(
    old_path: &Path,
    new_path: &Path,
    format: FileFormat,
    extension: &str,
    config: &Config,
) -> Result<CompareRun> {
    let old = parser::load(old_path, format, config)
        .with_context(|| format!("failed to load old snapshot {}", old_path.display()))?;
    let new = parser::load(new_path, format, config)
        .with_context(|| format!("failed to load new snapshot {}", new_path.display()))?;
    log::debug!(
        "loaded {} rows from {}, {} rows from {}",
        old.row_count(),
        old_path.display(),
        new.row_count(),
        new_path.display()
    );

    let outcome = diff::diff(&old, &new);

    let name = output::artifact_name(&old, &new, extension);
    let output_path = match config.output_dir {
        Some(ref dir) => dir.join(&name),
        None => PathBuf::from(&name),
    };
    output::render(&outcome, &old, &new, &output_path, format, config)
        .with_context(|| format!("failed to write {}", output_path.display()))?;
    log::info!("wrote {}", output_path.display());

    Ok(CompareRun {
        outcome,
        output_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn csv_run_writes_artifact_next_to_output_dir() {
        let dir = TempDir::new().unwrap();
        let old_path = dir.path().join("gener.csv");
        let new_path = dir.path().join("febrer.csv");
        fs::write(&old_path, "id;qty\nA;1\nB;2\n").unwrap();
        fs::write(&new_path, "id;qty\nA;5\nC;3\n").unwrap();
        let config = Config::new("id").with_output_dir(dir.path());

        let run = csv_diff(&old_path, &new_path, &config).unwrap();

        assert_eq!(run.output_path, dir.path().join("gener_vs_febrer.csv"));
        assert!(run.output_path.exists());
        assert_eq!(run.outcome.added_keys, vec!["C".to_string()]);
        assert_eq!(run.outcome.dropped_keys, vec!["B".to_string()]);
        assert_eq!(run.outcome.changed_count(), 1);
    }

    #[test]
    fn dropped_rows_carry_old_only_columns_into_the_artifact() {
        let dir = TempDir::new().unwrap();
        let old_path = dir.path().join("gener.csv");
        let new_path = dir.path().join("febrer.csv");
        fs::write(&old_path, "id;x;legacy\nA;1;old\nB;2;gone\n").unwrap();
        fs::write(&new_path, "id;x\nA;1\nC;3\n").unwrap();
        let config = Config::new("id").with_output_dir(dir.path());

        let run = csv_diff(&old_path, &new_path, &config).unwrap();

        let artifact = fs::read_to_string(&run.output_path).unwrap();
        let lines: Vec<&str> = artifact.lines().collect();
        assert_eq!(lines[0], "id;x;legacy;STATUS");
        assert_eq!(lines[1], "A;1;;");
        assert_eq!(lines[2], "B;2;gone;DROPPED");
        assert_eq!(lines[3], "C;3;;ADDED");
    }

    #[test]
    fn excel_run_writes_workbook() {
        use rust_xlsxwriter::Workbook;

        let dir = TempDir::new().unwrap();
        let old_path = dir.path().join("gener.xlsx");
        let new_path = dir.path().join("febrer.xlsx");
        for (path, qty) in [(&old_path, "1"), (&new_path, "2")] {
            let mut workbook = Workbook::new();
            let worksheet = workbook.add_worksheet();
            worksheet.write_string(0, 0, "id").unwrap();
            worksheet.write_string(0, 1, "qty").unwrap();
            worksheet.write_string(1, 0, "A").unwrap();
            worksheet.write_string(1, 1, qty).unwrap();
            workbook.save(path).unwrap();
        }
        let config = Config::new("id").with_output_dir(dir.path());

        let run = excel_diff(&old_path, &new_path, &config).unwrap();

        assert_eq!(run.output_path, dir.path().join("gener_vs_febrer.xlsx"));
        assert!(run.output_path.exists());
        assert!(run.outcome.has_changes());
    }

    #[test]
    fn missing_snapshot_fails_with_path_in_message() {
        let dir = TempDir::new().unwrap();
        let new_path = dir.path().join("febrer.csv");
        fs::write(&new_path, "id;qty\nA;1\n").unwrap();
        let config = Config::new("id").with_output_dir(dir.path());

        let err = csv_diff(&dir.path().join("absent.csv"), &new_path, &config).unwrap_err();

        assert!(format!("{err:#}").contains("absent.csv"));
    }
}
