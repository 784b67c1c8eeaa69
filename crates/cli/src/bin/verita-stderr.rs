use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use verita_summary::commands::stderr_command;
use verita_summary::init_tracing;

/// Print the verifier stderr captured in a Verita result file.
#[derive(Parser, Debug)]
#[command(name = "verita-stderr", version, about = "Show captured verifier stderr")]
struct Cli {
    /// Result file to extract stderr from.
    file: PathBuf,

    /// Print debugging output (can be repeated for more detail).
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count)]
    debug_level: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug_level);
    stderr_command(&cli.file)
}
