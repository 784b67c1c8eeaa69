//! Comparator: pairs the records of an old and a new run by file stem and
//! describes how each metric changed.
//!
//! Pairing uses the file stem rather than the project name because every
//! crate root of a multi-root project shares the project name but has to be
//! compared root by root.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::Serialize;

use crate::format::{
    count_or_dash, millis, percent_change, seconds_or_na, signed_fixed, signed_int, signed_plain,
    NOT_AVAILABLE,
};
use crate::model::{FunctionTiming, ProjectRecord, RunStatus};
use crate::run::Run;

/// Old and new record sharing one file stem.
///
/// An identity always exists in at least one run, so there is no variant
/// without a record.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "presence", rename_all = "snake_case")]
pub enum ComparisonEntry<'a> {
    /// Only the new run has the identity.
    New { new: &'a ProjectRecord },
    /// Only the old run has the identity.
    Removed { old: &'a ProjectRecord },
    Both { old: &'a ProjectRecord, new: &'a ProjectRecord },
}

/// Pair every identity found in either run, ordered by `(display_name, id)`.
///
/// The display name of an identity present on one side only comes from that
/// side.
pub fn compare_runs<'a>(old: &'a Run, new: &'a Run) -> Vec<ComparisonEntry<'a>> {
    let ids: BTreeSet<&str> = old.ids().chain(new.ids()).collect();
    let mut entries: Vec<ComparisonEntry<'a>> = ids
        .into_iter()
        .filter_map(|id| match (old.get(id), new.get(id)) {
            (Some(old), Some(new)) => Some(ComparisonEntry::Both { old, new }),
            (Some(old), None) => Some(ComparisonEntry::Removed { old }),
            (None, Some(new)) => Some(ComparisonEntry::New { new }),
            (None, None) => None,
        })
        .collect();
    entries.sort_by(|a, b| a.primary().sort_key().cmp(&b.primary().sort_key()));
    entries
}

impl<'a> ComparisonEntry<'a> {
    /// The record that names this entry: old when present, else new.
    fn primary(&self) -> &'a ProjectRecord {
        match *self {
            ComparisonEntry::New { new } => new,
            ComparisonEntry::Removed { old } | ComparisonEntry::Both { old, .. } => old,
        }
    }

    pub fn old_record(&self) -> Option<&'a ProjectRecord> {
        match *self {
            ComparisonEntry::New { .. } => None,
            ComparisonEntry::Removed { old } | ComparisonEntry::Both { old, .. } => Some(old),
        }
    }

    pub fn new_record(&self) -> Option<&'a ProjectRecord> {
        match *self {
            ComparisonEntry::Removed { .. } => None,
            ComparisonEntry::New { new } | ComparisonEntry::Both { new, .. } => Some(new),
        }
    }

    /// File stem shared by both sides.
    pub fn id(&self) -> &'a str {
        &self.primary().id
    }

    pub fn display_name(&self) -> &'a str {
        &self.primary().display_name
    }

    pub fn crate_root(&self) -> Option<&'a str> {
        self.primary().crate_root.as_deref()
    }

    pub fn status(&self) -> StatusChange {
        match *self {
            ComparisonEntry::New { .. } => StatusChange::New,
            ComparisonEntry::Removed { .. } => StatusChange::Removed,
            ComparisonEntry::Both { old, new } if old.status == new.status => {
                StatusChange::Unchanged(old.status)
            }
            ComparisonEntry::Both { old, new } => {
                StatusChange::Changed { old: old.status, new: new.status }
            }
        }
    }

    pub fn verified(&self) -> CountChange {
        self.count_change(|r| r.verified)
    }

    pub fn errors(&self) -> CountChange {
        self.count_change(|r| r.errors)
    }

    fn count_change(&self, metric: impl Fn(&ProjectRecord) -> Option<u64>) -> CountChange {
        match *self {
            ComparisonEntry::Both { old, new } => {
                CountChange::Pair { old: metric(old), new: metric(new) }
            }
            _ => CountChange::Single(metric(self.primary())),
        }
    }

    pub fn total_time(&self) -> TimeChange {
        match *self {
            ComparisonEntry::Both { old, new } => {
                TimeChange::Pair { old: old.total_time_ms, new: new.total_time_ms }
            }
            _ => TimeChange::Single(self.primary().total_time_ms),
        }
    }

    /// Changes for the union of each side's `top_n` slowest functions.
    pub fn function_changes(&self, top_n: usize) -> Vec<FunctionChange<'a>> {
        function_changes(self.old_record(), self.new_record(), top_n)
    }
}

/// Status cell of a comparison row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    New,
    Removed,
    Unchanged(RunStatus),
    Changed { old: RunStatus, new: RunStatus },
}

impl fmt::Display for StatusChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusChange::New => f.write_str("(new)"),
            StatusChange::Removed => f.write_str("(removed)"),
            StatusChange::Unchanged(status) => write!(f, "{status}"),
            StatusChange::Changed { old, new } => write!(f, "{old} → {new}"),
        }
    }
}

/// Change of a count metric (`verified`, `errors`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountChange {
    /// Only one run has the identity.
    Single(Option<u64>),
    Pair { old: Option<u64>, new: Option<u64> },
}

impl CountChange {
    /// Signed difference, when both sides have a value.
    pub fn delta(&self) -> Option<i64> {
        match *self {
            CountChange::Pair { old: Some(old), new: Some(new) } => Some(new as i64 - old as i64),
            _ => None,
        }
    }
}

impl fmt::Display for CountChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CountChange::Single(value) => f.write_str(&count_or_dash(value)),
            CountChange::Pair { old, new } => {
                write!(f, "{} → {}", count_or_dash(old), count_or_dash(new))?;
                if let Some(delta) = self.delta() {
                    write!(f, " ({})", signed_int(delta))?;
                }
                Ok(())
            }
        }
    }
}

/// Change of the total verification time, stored in milliseconds and shown
/// in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeChange {
    Single(Option<f64>),
    Pair { old: Option<f64>, new: Option<f64> },
}

impl TimeChange {
    /// `(delta seconds, percent of old)` when both sides have a time.
    pub fn delta(&self) -> Option<(f64, f64)> {
        match *self {
            TimeChange::Pair { old: Some(old), new: Some(new) } => {
                let (old_s, new_s) = (old / 1000.0, new / 1000.0);
                Some((new_s - old_s, percent_change(old_s, new_s)))
            }
            _ => None,
        }
    }
}

impl fmt::Display for TimeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TimeChange::Single(value) => f.write_str(&seconds_or_na(value)),
            TimeChange::Pair { old: Some(old), new: Some(new) } => {
                let (delta_s, pct) = self.delta().unwrap_or_default();
                write!(
                    f,
                    "{:.2} → {:.2} s ({} s, {}%)",
                    old / 1000.0,
                    new / 1000.0,
                    signed_fixed(delta_s, 2),
                    signed_fixed(pct, 1)
                )
            }
            TimeChange::Pair { old, new } => {
                write!(f, "{} → {}", seconds_or_na(old), seconds_or_na(new))
            }
        }
    }
}

/// One side of a per-function comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FunctionSide {
    /// The run has no entry for the function at all.
    Missing,
    /// The run lists the function without a time.
    Untimed,
    Timed(f64),
}

impl FunctionSide {
    fn of(timing: Option<&FunctionTiming>) -> Self {
        match timing {
            None => FunctionSide::Missing,
            Some(FunctionTiming { time_ms: None, .. }) => FunctionSide::Untimed,
            Some(FunctionTiming { time_ms: Some(ms), .. }) => FunctionSide::Timed(*ms),
        }
    }

    fn cell(&self, missing: &str) -> String {
        match self {
            FunctionSide::Missing => missing.to_string(),
            FunctionSide::Untimed => NOT_AVAILABLE.to_string(),
            FunctionSide::Timed(ms) => millis(*ms),
        }
    }
}

/// How one function's time changed between runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionChange<'a> {
    pub name: &'a str,
    pub old: FunctionSide,
    pub new: FunctionSide,
}

impl FunctionChange<'_> {
    /// Old-side cell; `(new)` when the old run lacks the function.
    pub fn old_cell(&self) -> String {
        self.old.cell("(new)")
    }

    /// New-side cell; `(gone)` when the new run lacks the function.
    pub fn new_cell(&self) -> String {
        self.new.cell("(gone)")
    }

    /// `(delta ms, percent of old)` when both sides are timed.
    pub fn delta(&self) -> Option<(f64, f64)> {
        match (self.old, self.new) {
            (FunctionSide::Timed(old), FunctionSide::Timed(new)) => {
                Some((new - old, percent_change(old, new)))
            }
            _ => None,
        }
    }

    /// `+5 ms (+5.6%)`, or empty when a side has no time.
    pub fn change_cell(&self) -> String {
        match self.delta() {
            Some((delta, pct)) => format!("{} ms ({}%)", signed_plain(delta), signed_fixed(pct, 1)),
            None => String::new(),
        }
    }
}

/// Union of each side's `top_n` slowest functions, old side first, each name
/// once in first-seen order.
pub fn function_changes<'a>(
    old: Option<&'a ProjectRecord>,
    new: Option<&'a ProjectRecord>,
    top_n: usize,
) -> Vec<FunctionChange<'a>> {
    let old_top = old.map(|r| r.slowest_functions(top_n)).unwrap_or_default();
    let new_top = new.map(|r| r.slowest_functions(top_n)).unwrap_or_default();
    let old_by_name = old.map(ProjectRecord::functions_by_name).unwrap_or_default();
    let new_by_name = new.map(ProjectRecord::functions_by_name).unwrap_or_default();

    let mut seen = HashSet::new();
    old_top
        .into_iter()
        .chain(new_top)
        .filter(|f| seen.insert(f.name.as_str()))
        .map(|f| {
            let name = f.name.as_str();
            FunctionChange {
                name,
                old: FunctionSide::of(old_by_name.get(name).copied()),
                new: FunctionSide::of(new_by_name.get(name).copied()),
            }
        })
        .collect()
}

/// Run-wide totals of both runs side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalsChange {
    pub projects: (usize, usize),
    pub verified: CountChange,
    pub errors: CountChange,
}

pub fn compare_totals(old: &Run, new: &Run) -> TotalsChange {
    let (old, new) = (old.totals(), new.totals());
    TotalsChange {
        projects: (old.projects, new.projects),
        verified: CountChange::Pair { old: Some(old.verified), new: Some(new.verified) },
        errors: CountChange::Pair { old: Some(old.errors), new: Some(new.errors) },
    }
}
