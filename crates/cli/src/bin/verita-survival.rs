use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use verita_summary::commands::survival_command;
use verita_summary::{init_tracing, resolve_report_config};

/// Emit survival-curve data (functions verified within a given time) for one
/// or more Verita result directories as CSV, ready for external plotting.
#[derive(Parser, Debug)]
#[command(name = "verita-survival", version, about = "Survival-curve data for Verita runs")]
struct Cli {
    /// Results directories; each becomes one series labelled by its name.
    #[arg(value_name = "DIR", required = true)]
    dirs: Vec<PathBuf>,

    /// Write the CSV here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report config file (.json, .yaml or .yml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print debugging output (can be repeated for more detail).
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count)]
    debug_level: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug_level);

    let config = resolve_report_config(cli.config.as_deref(), None)?;
    survival_command(&cli.dirs, &config, cli.output.as_deref())
}
