//! Result Loader: one Verita result file in, one [`ProjectRecord`] out.
//!
//! The raw document is deserialized into mirror structs where every field is
//! optional, then normalized in a single step. A field that is absent (or
//! `null`) never raises; a field that is present with the wrong type makes
//! the whole document malformed.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::model::{FunctionTiming, ProjectRecord, RunStatus};
use crate::resolver::resolve_crate_root;

/// Error type for loading a single result file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read result file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not JSON, or a present field has an unexpected type.
    #[error("Malformed result file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Result file has no usable file stem: {0}")]
    InvalidFileName(PathBuf),
}

#[derive(Debug, Default, Deserialize)]
struct ResultDocument {
    runner: Option<Runner>,
    #[serde(rename = "verification-results")]
    verification_results: Option<VerificationResults>,
    #[serde(rename = "times-ms")]
    times_ms: Option<TimesMs>,
}

#[derive(Debug, Default, Deserialize)]
struct Runner {
    success: Option<bool>,
    stderr: Option<String>,
    run_configuration: Option<RunConfiguration>,
}

#[derive(Debug, Default, Deserialize)]
struct RunConfiguration {
    name: Option<String>,
    crate_roots: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct VerificationResults {
    verified: Option<u64>,
    errors: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct TimesMs {
    total: Option<f64>,
    smt: Option<SmtTimes>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct SmtTimes {
    smt_run_module_times: Option<Vec<ModuleTimes>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ModuleTimes {
    function_breakdown: Option<Vec<FunctionTime>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct FunctionTime {
    function: Option<String>,
    time: Option<f64>,
    time_micros: Option<f64>,
    success: Option<bool>,
}

impl ResultDocument {
    fn into_record(self, stem: &str) -> ProjectRecord {
        let runner = self.runner.unwrap_or_default();
        let config = runner.run_configuration.unwrap_or_default();
        let results = self.verification_results.unwrap_or_default();
        let times = self.times_ms.unwrap_or_default();

        let display_name = config.name.unwrap_or_else(|| stem.to_string());
        let crate_roots = config.crate_roots.unwrap_or_default();
        let crate_root =
            resolve_crate_root(stem, &display_name, &crate_roots).crate_root().map(str::to_string);

        let functions = times
            .smt
            .and_then(|smt| smt.smt_run_module_times)
            .unwrap_or_default()
            .into_iter()
            .flat_map(|module| module.function_breakdown.unwrap_or_default())
            .map(|f| FunctionTiming {
                name: f.function.unwrap_or_default(),
                time_ms: f.time,
                time_us: f.time_micros,
                success: f.success,
            })
            .collect();

        ProjectRecord {
            id: stem.to_string(),
            display_name,
            crate_root,
            status: RunStatus::from_runner_success(runner.success),
            verified: results.verified,
            errors: results.errors,
            total_time_ms: times.total,
            functions,
        }
    }
}

/// Build a record from the text of a result document.
pub fn parse_record(stem: &str, json: &str) -> Result<ProjectRecord, serde_json::Error> {
    let document: ResultDocument = serde_json::from_str(json)?;
    Ok(document.into_record(stem))
}

/// Build a record from an already parsed result document.
pub fn record_from_value(
    stem: &str,
    value: serde_json::Value,
) -> Result<ProjectRecord, serde_json::Error> {
    let document: ResultDocument = serde_json::from_value(value)?;
    Ok(document.into_record(stem))
}

/// File stem used as the record id (`results/foo-src.json` -> `foo-src`).
pub fn result_stem(path: &Path) -> Result<String, LoadError> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| LoadError::InvalidFileName(path.to_path_buf()))
}

fn read_result_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })
}

/// Load one result file into a [`ProjectRecord`] keyed by its file stem.
pub fn load_record(path: &Path) -> Result<ProjectRecord, LoadError> {
    let stem = result_stem(path)?;
    let body = read_result_file(path)?;
    let record = parse_record(&stem, &body)
        .map_err(|source| LoadError::Malformed { path: path.to_path_buf(), source })?;
    debug!(
        path = %path.display(),
        project = %record.display_name,
        functions = record.functions.len(),
        "loaded result file"
    );
    Ok(record)
}

/// Captured verifier stderr stored by the runner, if any.
pub fn load_runner_stderr(path: &Path) -> Result<Option<String>, LoadError> {
    let body = read_result_file(path)?;
    let document: ResultDocument = serde_json::from_str(&body)
        .map_err(|source| LoadError::Malformed { path: path.to_path_buf(), source })?;
    Ok(document.runner.and_then(|r| r.stderr))
}
