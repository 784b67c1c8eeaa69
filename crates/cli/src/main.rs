use std::path::PathBuf;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use verita_summary::commands::summary_command;
use verita_summary::{init_tracing, resolve_report_config};

/// Summarize Verita verification results.
///
/// With one directory, prints a per-project summary and the slowest functions
/// of each project. With two directories (old then new), compares the runs.
/// This CLI is a thin wrapper around `verita-core`; all substantive logic
/// lives in the library.
#[derive(Parser, Debug)]
#[command(
    name = "verita-summary",
    version,
    about = "Summarize or compare Verita verification results",
    after_help = "Examples:\n  verita-summary output/2026-01-10-baseline/\n  verita-summary output/2026-01-10-baseline/ output/2026-01-11-experiment/"
)]
struct Cli {
    /// Results directory, or an old and a new directory to compare.
    ///
    /// Each directory should contain the JSON files produced by a single
    /// Verita run.
    #[arg(value_name = "DIR", required = true)]
    dirs: Vec<PathBuf>,

    /// Emit JSON instead of human-readable text.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Report config file (.json, .yaml or .yml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of slowest functions to list per project.
    #[arg(long)]
    top: Option<usize>,

    /// Print debugging output (can be repeated for more detail).
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count)]
    debug_level: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if !matches!(cli.dirs.len(), 1 | 2) {
        Cli::command()
            .error(ErrorKind::WrongNumberOfValues, "Expected 1 or 2 directories")
            .exit();
    }
    init_tracing(cli.debug_level);

    let config = resolve_report_config(cli.config.as_deref(), cli.top)?;
    summary_command(&cli.dirs, &config, cli.json)
}
