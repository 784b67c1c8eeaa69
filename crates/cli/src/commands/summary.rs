use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::warn;
use verita_core::compare::{compare_runs, ComparisonEntry};
use verita_core::config::ReportConfig;
use verita_core::report::{render_comparison, render_single};
use verita_core::run::{Run, RunError, RunTotals};

#[derive(Serialize)]
pub struct RunSnapshot<'a> {
    pub run: &'a Run,
    pub totals: RunTotals,
}

#[derive(Serialize)]
pub struct ComparisonSnapshot<'a> {
    pub old: &'a str,
    pub new: &'a str,
    pub old_totals: RunTotals,
    pub new_totals: RunTotals,
    pub entries: Vec<ComparisonEntry<'a>>,
}

fn no_files_message(config: &ReportConfig, location: &str) -> String {
    format!("No {} files found in {}\n", config.extension.to_uppercase(), location)
}

/// Render the report for one directory or an old/new pair of directories.
pub fn render_summary(dirs: &[PathBuf], config: &ReportConfig, json: bool) -> Result<String> {
    match dirs {
        [dir] => render_single_summary(dir, config, json),
        [old, new] => render_comparison_summary(old, new, config, json),
        _ => bail!("Expected 1 or 2 directories, got {}", dirs.len()),
    }
}

/// Summary of one results directory.
pub fn render_single_summary(dir: &Path, config: &ReportConfig, json: bool) -> Result<String> {
    let run = match Run::load(dir, config) {
        Ok(run) => run,
        Err(RunError::NoResultFiles(_)) => {
            return Ok(no_files_message(config, &dir.display().to_string()))
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to load results from {}", dir.display()))
        }
    };

    if json {
        let snapshot = RunSnapshot { run: &run, totals: run.totals() };
        let mut serialized =
            serde_json::to_string_pretty(&snapshot).context("Failed to serialize run to JSON")?;
        serialized.push('\n');
        return Ok(serialized);
    }
    Ok(render_single(&run, config))
}

/// Old-vs-new comparison of two results directories.
///
/// One empty directory is allowed (every identity is then new or removed);
/// both empty is reported instead of rendering empty tables.
pub fn render_comparison_summary(
    old_dir: &Path,
    new_dir: &Path,
    config: &ReportConfig,
    json: bool,
) -> Result<String> {
    let old = Run::load_or_empty(old_dir, config)
        .with_context(|| format!("Failed to load results from {}", old_dir.display()))?;
    let new = Run::load_or_empty(new_dir, config)
        .with_context(|| format!("Failed to load results from {}", new_dir.display()))?;

    match (old.is_empty(), new.is_empty()) {
        (true, true) => return Ok(no_files_message(config, "either directory")),
        (true, false) => warn!(dir = %old_dir.display(), "old results directory is empty"),
        (false, true) => warn!(dir = %new_dir.display(), "new results directory is empty"),
        (false, false) => {}
    }

    if json {
        let snapshot = ComparisonSnapshot {
            old: &old.label,
            new: &new.label,
            old_totals: old.totals(),
            new_totals: new.totals(),
            entries: compare_runs(&old, &new),
        };
        let mut serialized = serde_json::to_string_pretty(&snapshot)
            .context("Failed to serialize comparison to JSON")?;
        serialized.push('\n');
        return Ok(serialized);
    }
    Ok(render_comparison(&old, &new, config))
}

/// Print the summary (or comparison) report to stdout.
pub fn summary_command(dirs: &[PathBuf], config: &ReportConfig, json: bool) -> Result<()> {
    let report = render_summary(dirs, config, json)?;
    print!("{report}");
    Ok(())
}
