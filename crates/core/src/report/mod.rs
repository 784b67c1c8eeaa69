//! Report Renderer: plain-text summaries of one run or of an old/new pair.
//!
//! Everything here is pure formatting into a `String`; printing is left to
//! the frontend. Entries are always ordered by `(display_name, id)`, so
//! rendering the same input twice gives identical output.

pub mod table;

use crate::compare::{compare_runs, compare_totals, ComparisonEntry};
use crate::config::ReportConfig;
use crate::format::{count_or_dash, millis, seconds_or_na, width, NOT_AVAILABLE};
use crate::model::ProjectRecord;
use crate::run::Run;

pub use table::{Align, Column, Table};

const NO_TIMING_DATA: &str = "  (no timing data available)\n";

fn summary_columns(show_crate_root: bool) -> Vec<Column> {
    let mut columns = vec![Column::left("Project")];
    if show_crate_root {
        columns.push(Column::left("Crate Root"));
    }
    columns.push(Column::left("Status"));
    columns.push(Column::right("Verified"));
    columns.push(Column::right("Errors"));
    columns.push(Column::right("Total Time"));
    columns
}

fn project_heading(name: &str, crate_root: Option<&str>) -> String {
    match crate_root {
        Some(root) => format!("--- {name} ({root}) ---\n"),
        None => format!("--- {name} ---\n"),
    }
}

fn slowest_heading(config: &ReportConfig) -> String {
    format!("=== Top {} Slowest Functions ===\n\n", config.top_functions)
}

/// Project table for a single run.
///
/// The crate root column is decided once for the whole run.
pub fn single_summary_table(run: &Run) -> Table {
    let show_crate_root = run.has_crate_roots();
    let mut table = Table::new(summary_columns(show_crate_root));
    for record in run.entries() {
        let mut cells = vec![record.display_name.clone()];
        if show_crate_root {
            cells.push(record.crate_root.clone().unwrap_or_default());
        }
        cells.push(record.status.to_string());
        cells.push(count_or_dash(record.verified));
        cells.push(count_or_dash(record.errors));
        cells.push(seconds_or_na(record.total_time_ms));
        table.push_row(cells);
    }
    table
}

fn single_totals_line(run: &Run) -> String {
    let totals = run.totals();
    format!(
        "Total: {} projects ({} OK, {} FAILED, {} ERROR), {} verified, {} errors\n",
        totals.projects, totals.ok, totals.failed, totals.error, totals.verified, totals.errors
    )
}

/// Ranked list of one record's slowest functions.
fn slowest_functions_block(record: &ProjectRecord, top_n: usize) -> String {
    let ranked = record.slowest_functions(top_n);
    if ranked.is_empty() {
        return NO_TIMING_DATA.to_string();
    }

    let lines: Vec<(String, String, &str)> = ranked
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let time = f.time_ms.map(millis).unwrap_or_else(|| NOT_AVAILABLE.to_string());
            (format!("{}.", i + 1), time, f.name.as_str())
        })
        .collect();
    let rank_w = lines.iter().map(|(rank, _, _)| width(rank)).max().unwrap_or(0);
    let time_w = lines.iter().map(|(_, time, _)| width(time)).max().unwrap_or(0);

    let mut out = String::new();
    for (rank, time, name) in &lines {
        out.push_str(&format!("  {rank:<rank_w$}  {time:>time_w$}   {name}\n"));
    }
    out
}

/// Summary of a single run followed by each project's slowest functions.
pub fn render_single(run: &Run, config: &ReportConfig) -> String {
    let mut out = String::from("=== Project Summary ===\n\n");
    out.push_str(&single_summary_table(run).render(""));
    out.push('\n');
    out.push_str(&single_totals_line(run));
    out.push('\n');

    out.push_str(&slowest_heading(config));
    for record in run.entries() {
        out.push_str(&project_heading(&record.display_name, record.crate_root.as_deref()));
        out.push_str(&slowest_functions_block(record, config.top_functions));
        out.push('\n');
    }
    out
}

/// Project table comparing two runs.
///
/// The crate root column appears when any entry covers a specific crate
/// root; an entry takes its crate root from the old side when present.
pub fn comparison_summary_table(entries: &[ComparisonEntry<'_>]) -> Table {
    let show_crate_root = entries.iter().any(|e| e.crate_root().is_some());
    let mut table = Table::new(summary_columns(show_crate_root));
    for entry in entries {
        let mut cells = vec![entry.display_name().to_string()];
        if show_crate_root {
            cells.push(entry.crate_root().unwrap_or_default().to_string());
        }
        cells.push(entry.status().to_string());
        cells.push(entry.verified().to_string());
        cells.push(entry.errors().to_string());
        cells.push(entry.total_time().to_string());
        table.push_row(cells);
    }
    table
}

fn comparison_totals_line(old: &Run, new: &Run) -> String {
    let totals = compare_totals(old, new);
    format!(
        "Total: {} → {} projects, verified {}, errors {}\n",
        totals.projects.0, totals.projects.1, totals.verified, totals.errors
    )
}

/// Function/Old/New/Change table for one compared identity.
fn function_changes_block(entry: &ComparisonEntry<'_>, top_n: usize) -> String {
    let changes = entry.function_changes(top_n);
    if changes.is_empty() {
        return NO_TIMING_DATA.to_string();
    }

    let mut table = Table::new(vec![
        Column::left("Function"),
        Column::right("Old"),
        Column::right("New"),
        Column::left("Change"),
    ]);
    for change in &changes {
        table.push_row(vec![
            change.name.to_string(),
            change.old_cell(),
            change.new_cell(),
            change.change_cell(),
        ]);
    }
    table.render("  ")
}

/// Comparison of two runs: project table, totals, then per-identity
/// function deltas.
pub fn render_comparison(old: &Run, new: &Run, config: &ReportConfig) -> String {
    let entries = compare_runs(old, new);

    let mut out = String::from("=== Project Summary (old → new) ===\n\n");
    out.push_str(&comparison_summary_table(&entries).render(""));
    out.push('\n');
    out.push_str(&comparison_totals_line(old, new));
    out.push('\n');

    out.push_str(&slowest_heading(config));
    for entry in &entries {
        out.push_str(&project_heading(entry.display_name(), entry.crate_root()));
        out.push_str(&function_changes_block(entry, config.top_functions));
        out.push('\n');
    }
    out
}
