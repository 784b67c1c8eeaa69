//! Normalized data model for Verita result files.
//!
//! Every field that may be missing from a result document is an explicit
//! `Option` here. The loader performs all defaulting once, so code that
//! consumes these types never has to probe raw JSON.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Timing of one function taken from an SMT module breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionTiming {
    pub name: String,
    pub time_ms: Option<f64>,
    pub time_us: Option<f64>,
    pub success: Option<bool>,
}

impl FunctionTiming {
    pub fn new(name: impl Into<String>, time_ms: Option<f64>) -> Self {
        Self { name: name.into(), time_ms, time_us: None, success: None }
    }

    pub fn with_success(mut self, success: Option<bool>) -> Self {
        self.success = success;
        self
    }

    /// Time used for ranking; a missing time ranks as zero.
    pub fn rank_time(&self) -> f64 {
        self.time_ms.unwrap_or(0.0)
    }
}

/// Outcome of the runner for one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Ok,
    Failed,
    /// The runner did not record a success flag at all.
    Error,
}

impl RunStatus {
    pub fn from_runner_success(success: Option<bool>) -> Self {
        match success {
            Some(true) => RunStatus::Ok,
            Some(false) => RunStatus::Failed,
            None => RunStatus::Error,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Ok => "OK",
            RunStatus::Failed => "FAILED",
            RunStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One verification run against one project, or one crate root of a
/// multi-root project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// File stem of the result file; unique within a directory.
    pub id: String,
    /// Project name; shared by every crate root of a multi-root project.
    pub display_name: String,
    /// Crate root covered by this record, `None` for single-root projects.
    pub crate_root: Option<String>,
    pub status: RunStatus,
    pub verified: Option<u64>,
    pub errors: Option<u64>,
    pub total_time_ms: Option<f64>,
    /// Functions in discovery order.
    pub functions: Vec<FunctionTiming>,
}

impl ProjectRecord {
    /// Key used for every report ordering: `(display_name, id)`.
    pub fn sort_key(&self) -> (&str, &str) {
        (&self.display_name, &self.id)
    }

    /// The `n` slowest functions, slowest first.
    ///
    /// Functions without a time rank as zero; ties keep discovery order.
    pub fn slowest_functions(&self, n: usize) -> Vec<&FunctionTiming> {
        let mut ranked: Vec<&FunctionTiming> = self.functions.iter().collect();
        ranked.sort_by(|a, b| b.rank_time().total_cmp(&a.rank_time()));
        ranked.truncate(n);
        ranked
    }

    /// Index functions by name. If a name repeats, the last entry wins.
    pub fn functions_by_name(&self) -> HashMap<&str, &FunctionTiming> {
        self.functions.iter().map(|f| (f.name.as_str(), f)).collect()
    }
}
