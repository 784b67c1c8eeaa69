use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of slowest functions listed per project unless configured otherwise.
pub const DEFAULT_TOP_FUNCTIONS: usize = 5;

/// Extension of the result files a Verita run writes.
pub const DEFAULT_RESULT_EXTENSION: &str = "json";

fn default_top_functions() -> usize {
    DEFAULT_TOP_FUNCTIONS
}

fn default_extension() -> String {
    DEFAULT_RESULT_EXTENSION.to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read report config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse report config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported report config format '{0}'. Allowed: json, yaml, yml")]
    UnsupportedFormat(String),

    #[error("top_functions must be at least 1")]
    InvalidTopFunctions,
}

/// Serializable settings for summary and comparison reports.
///
/// Every field has a default, so an empty document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// How many slowest functions to list per project and side.
    #[serde(default = "default_top_functions")]
    pub top_functions: usize,
    /// Extension (without the dot) of result files to pick up in a directory.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { top_functions: DEFAULT_TOP_FUNCTIONS, extension: default_extension() }
    }
}

impl ReportConfig {
    pub fn with_top_functions(mut self, top_functions: usize) -> Self {
        self.top_functions = top_functions;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_functions == 0 {
            return Err(ConfigError::InvalidTopFunctions);
        }
        Ok(())
    }
}

/// Load a report config from a `.json`, `.yaml` or `.yml` file.
pub fn load_report_config(path: &Path) -> Result<ReportConfig, ConfigError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_string();
    let body = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    let parse_error = |message: String| ConfigError::Parse { path: path.to_path_buf(), message };

    let config: ReportConfig = match ext.as_str() {
        "json" => serde_json::from_str(&body).map_err(|e| parse_error(e.to_string()))?,
        // An empty YAML document deserializes as unit, not as a map.
        "yaml" | "yml" if body.trim().is_empty() => ReportConfig::default(),
        "yaml" | "yml" => serde_yaml::from_str(&body).map_err(|e| parse_error(e.to_string()))?,
        other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
    };
    config.validate()?;
    Ok(config)
}
