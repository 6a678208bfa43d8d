//! snapdiff - Snapshot comparison for tabular exports

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use termcolor::{ColorChoice, StandardStream};

use snapdiff::config::{Config, StatusLabels};
use snapdiff::output::report;
use snapdiff::run::{csv_diff, excel_diff, CompareRun};

/// Compare two snapshots of a tabular export and write a highlighted diff
#[derive(Parser, Debug)]
#[command(name = "snapdiff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare two Excel workbooks
    Excel {
        #[command(flatten)]
        common: CommonArgs,

        /// Sheet to compare (default: first sheet of each workbook)
        #[arg(long)]
        sheet: Option<String>,
    },

    /// Compare two delimited-text files
    Csv {
        #[command(flatten)]
        common: CommonArgs,

        /// Field delimiter ("\t" or "tab" for tab-separated input)
        #[arg(short, long, default_value = ";")]
        delimiter: String,

        /// Fallback encoding when auto-detection is rejected
        #[arg(short, long, default_value = "ISO-8859-1")]
        encoding: String,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Old snapshot to compare against
    old_file: PathBuf,

    /// New snapshot
    new_file: PathBuf,

    /// Column holding the row key
    #[arg(short, long)]
    key: String,

    /// Directory the artifact is written to (default: current directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// STATUS labels as added,changed,dropped (e.g. "NOVA,CANVI,ELIMINADA")
    #[arg(long, value_delimiter = ',')]
    labels: Option<Vec<String>>,
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(has_changes) => {
            if has_changes {
                ExitCode::from(1) // Differences found
            } else {
                ExitCode::SUCCESS // No differences
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Excel {
            ref common,
            ref sheet,
        } => {
            let mut config = build_config(common)?;
            if let Some(name) = sheet {
                config = config.with_sheet(name.clone());
            }
            excel_diff(&common.old_file, &common.new_file, &config)?
        }
        Command::Csv {
            ref common,
            ref delimiter,
            ref encoding,
        } => {
            let fallback = encoding_rs::Encoding::for_label(encoding.as_bytes())
                .with_context(|| format!("unknown encoding label '{encoding}'"))?;
            let config = build_config(common)?
                .with_delimiter(parse_delimiter(delimiter)?)
                .with_fallback_encoding(fallback);
            csv_diff(&common.old_file, &common.new_file, &config)?
        }
    };

    print_summary(&result)
}

fn build_config(common: &CommonArgs) -> Result<Config> {
    let mut config = Config::new(common.key.clone());

    if let Some(ref dir) = common.output_dir {
        config = config.with_output_dir(dir.clone());
    }

    if let Some(ref labels) = common.labels {
        if labels.len() != 3 {
            bail!("--labels expects exactly three values: added,changed,dropped");
        }
        config = config.with_status_labels(StatusLabels {
            added: labels[0].clone(),
            changed: labels[1].clone(),
            dropped: labels[2].clone(),
        });
    }

    Ok(config)
}

fn parse_delimiter(raw: &str) -> Result<u8> {
    if raw == "\\t" || raw.eq_ignore_ascii_case("tab") {
        return Ok(b'\t');
    }
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => bail!("delimiter must be a single ASCII character, got '{raw}'"),
    }
}

fn print_summary(result: &CompareRun) -> Result<bool> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    report::write_summary(&result.outcome, &mut stdout)?;
    println!("Wrote {}", result.output_path.display());

    Ok(result.outcome.has_changes())
}
