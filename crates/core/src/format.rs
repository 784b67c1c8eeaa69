//! Cell formatting shared by the comparator and the report renderer.

/// Placeholder for a missing count.
pub const DASH: &str = "-";
/// Placeholder for a missing time.
pub const NOT_AVAILABLE: &str = "N/A";

/// Render a count, or `-` when absent.
pub fn count_or_dash(value: Option<u64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => DASH.to_string(),
    }
}

/// Render milliseconds as seconds with two decimals (`12.35 s`), or `N/A`.
pub fn seconds_or_na(ms: Option<f64>) -> String {
    match ms {
        Some(ms) => format!("{:.2} s", ms / 1000.0),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Render a millisecond value the way it appears in the result file
/// (`120 ms`, `12.5 ms`).
pub fn millis(ms: f64) -> String {
    format!("{} ms", ms)
}

/// Signed integer with an explicit `+` for non-negative values.
pub fn signed_int(delta: i64) -> String {
    if delta >= 0 {
        format!("+{delta}")
    } else {
        delta.to_string()
    }
}

/// Signed number with an explicit `+` for non-negative values and a fixed
/// number of decimals.
pub fn signed_fixed(value: f64, decimals: usize) -> String {
    if value >= 0.0 {
        format!("+{value:.decimals$}")
    } else {
        format!("{value:.decimals$}")
    }
}

/// Signed number printed with its natural precision (`+5`, `-2.5`).
pub fn signed_plain(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value}")
    } else {
        format!("{value}")
    }
}

/// Percentage change relative to `old`; zero when `old` is zero.
pub fn percent_change(old: f64, new: f64) -> f64 {
    if old == 0.0 {
        0.0
    } else {
        (new - old) / old * 100.0
    }
}

/// Display width of a cell in characters.
pub fn width(cell: &str) -> usize {
    cell.chars().count()
}
