//! Run Aggregator: every result file of one output directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ReportConfig;
use crate::loader::{load_record, LoadError};
use crate::model::{ProjectRecord, RunStatus};

/// Error type for loading a whole run directory.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to read results directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory exists but holds no result files.
    ///
    /// Kept separate from an empty-but-valid run so callers can report it
    /// instead of printing an empty table.
    #[error("No result files found in {0}")]
    NoResultFiles(PathBuf),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Run-wide totals. Absent counts contribute zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunTotals {
    pub projects: usize,
    pub verified: u64,
    pub errors: u64,
    pub ok: usize,
    pub failed: usize,
    pub error: usize,
}

/// The project records of one results directory, keyed by file stem.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Run {
    /// Human label for the run, usually the directory name.
    pub label: String,
    records: BTreeMap<String, ProjectRecord>,
}

impl Run {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), records: BTreeMap::new() }
    }

    /// Build a run from records; a repeated id replaces the earlier record.
    pub fn from_records(
        label: impl Into<String>,
        records: impl IntoIterator<Item = ProjectRecord>,
    ) -> Self {
        let mut run = Self::new(label);
        for record in records {
            run.records.insert(record.id.clone(), record);
        }
        run
    }

    /// Load every result file in `dir`.
    ///
    /// Fails with [`RunError::NoResultFiles`] when the directory has none,
    /// and aborts on the first malformed file.
    pub fn load(dir: &Path, config: &ReportConfig) -> Result<Self, RunError> {
        let files = discover_result_files(dir, &config.extension)?;
        if files.is_empty() {
            return Err(RunError::NoResultFiles(dir.to_path_buf()));
        }

        let mut records = Vec::with_capacity(files.len());
        for path in &files {
            records.push(load_record(path)?);
        }
        let run = Self::from_records(run_label(dir), records);
        info!(dir = %dir.display(), records = run.len(), "loaded run");
        Ok(run)
    }

    /// Like [`Run::load`], but a directory without result files yields an
    /// empty run.
    pub fn load_or_empty(dir: &Path, config: &ReportConfig) -> Result<Self, RunError> {
        match Self::load(dir, config) {
            Err(RunError::NoResultFiles(_)) => Ok(Self::new(run_label(dir))),
            other => other,
        }
    }

    pub fn get(&self, id: &str) -> Option<&ProjectRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record ids (file stems) in lexical order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Records ordered by `(display_name, id)`.
    pub fn entries(&self) -> Vec<&ProjectRecord> {
        let mut entries: Vec<&ProjectRecord> = self.records.values().collect();
        entries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        entries
    }

    /// True when any record covers a specific crate root.
    pub fn has_crate_roots(&self) -> bool {
        self.records.values().any(|r| r.crate_root.is_some())
    }

    pub fn totals(&self) -> RunTotals {
        let mut totals = RunTotals { projects: self.records.len(), ..RunTotals::default() };
        for record in self.records.values() {
            totals.verified += record.verified.unwrap_or(0);
            totals.errors += record.errors.unwrap_or(0);
            match record.status {
                RunStatus::Ok => totals.ok += 1,
                RunStatus::Failed => totals.failed += 1,
                RunStatus::Error => totals.error += 1,
            }
        }
        totals
    }
}

/// Label a run by its directory name, falling back to the full path.
pub fn run_label(dir: &Path) -> String {
    dir.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| dir.display().to_string())
}

/// List result files (non-recursive) in `dir` with the given extension,
/// sorted by path.
pub fn discover_result_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, RunError> {
    let io_error = |source: std::io::Error| RunError::Io { path: dir.to_path_buf(), source };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path);
        }
    }
    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "discovered result files");
    Ok(files)
}
