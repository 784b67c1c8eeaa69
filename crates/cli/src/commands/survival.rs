use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};
use verita_core::config::ReportConfig;
use verita_core::run::{Run, RunError};
use verita_core::survival::{render_survival_csv, survival_series};

/// Survival-curve CSV with one series per results directory.
///
/// Directories without result files are skipped with a warning.
pub fn render_survival(dirs: &[PathBuf], config: &ReportConfig) -> Result<String> {
    let mut series = Vec::with_capacity(dirs.len());
    for dir in dirs {
        match Run::load(dir, config) {
            Ok(run) => series.push(survival_series(&run)),
            Err(RunError::NoResultFiles(_)) => {
                warn!(dir = %dir.display(), "no result files; skipping survival series");
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to load results from {}", dir.display()))
            }
        }
    }
    Ok(render_survival_csv(&series))
}

/// Write survival-curve data to `output`, or stdout when no file is given.
pub fn survival_command(dirs: &[PathBuf], config: &ReportConfig, output: Option<&Path>) -> Result<()> {
    let csv = render_survival(dirs, config)?;
    match output {
        Some(path) => {
            fs::write(path, csv)
                .with_context(|| format!("Failed to write survival data to {}", path.display()))?;
            info!(path = %path.display(), "wrote survival data");
            println!("Wrote survival data: {}", path.display());
        }
        None => print!("{csv}"),
    }
    Ok(())
}
