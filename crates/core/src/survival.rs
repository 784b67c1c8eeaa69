//! Survival-curve series of solver timings.
//!
//! A survival curve plots how many functions were verified within a given
//! time. Drawing the plot is left to external tooling; this module produces
//! the points and writes them as CSV.

use serde::Serialize;

use crate::run::Run;

/// One step of a survival curve: `solved` functions finished within
/// `time_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurvivalPoint {
    pub time_ms: f64,
    pub solved: usize,
}

/// Survival curve of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivalSeries {
    pub label: String,
    pub points: Vec<SurvivalPoint>,
}

/// Build the curve from every function that succeeded and has a time.
///
/// Points are sorted by time; the n-th point has `solved == n`.
pub fn survival_series(run: &Run) -> SurvivalSeries {
    let mut times: Vec<f64> = run
        .entries()
        .into_iter()
        .flat_map(|record| record.functions.iter())
        .filter(|f| f.success == Some(true))
        .filter_map(|f| f.time_ms)
        .collect();
    times.sort_by(f64::total_cmp);

    let points = times
        .into_iter()
        .enumerate()
        .map(|(i, time_ms)| SurvivalPoint { time_ms, solved: i + 1 })
        .collect();
    SurvivalSeries { label: run.label.clone(), points }
}

/// CSV with a `series,time_ms,solved` header and one line per point.
pub fn render_survival_csv(series: &[SurvivalSeries]) -> String {
    let mut out = String::from("series,time_ms,solved\n");
    for s in series {
        for point in &s.points {
            out.push_str(&format!("{},{},{}\n", csv_field(&s.label), point.time_ms, point.solved));
        }
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
