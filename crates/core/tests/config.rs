use std::fs;

use tempfile::tempdir;
use verita_core::config::{load_report_config, ConfigError, ReportConfig, DEFAULT_TOP_FUNCTIONS};

#[test]
fn defaults() {
    let config = ReportConfig::default();
    assert_eq!(config.top_functions, DEFAULT_TOP_FUNCTIONS);
    assert_eq!(config.extension, "json");
    assert!(config.validate().is_ok());
}

#[test]
fn loads_json_and_yaml() {
    let dir = tempdir().unwrap();

    let json = dir.path().join("report.json");
    fs::write(&json, r#"{"top_functions": 3}"#).unwrap();
    let config = load_report_config(&json).unwrap();
    assert_eq!(config.top_functions, 3);
    assert_eq!(config.extension, "json");

    let yaml = dir.path().join("report.yaml");
    fs::write(&yaml, "top_functions: 8\nextension: out\n").unwrap();
    let config = load_report_config(&yaml).unwrap();
    assert_eq!(config, ReportConfig { top_functions: 8, extension: "out".into() });

    let yml = dir.path().join("report.yml");
    fs::write(&yml, "extension: res\n").unwrap();
    let config = load_report_config(&yml).unwrap();
    assert_eq!(config.top_functions, DEFAULT_TOP_FUNCTIONS);
    assert_eq!(config.extension, "res");
}

#[test]
fn empty_yaml_is_the_default_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.yaml");
    fs::write(&path, "\n").unwrap();
    assert_eq!(load_report_config(&path).unwrap(), ReportConfig::default());
}

#[test]
fn rejects_bad_configs() {
    let dir = tempdir().unwrap();

    let toml = dir.path().join("report.toml");
    fs::write(&toml, "top_functions = 3").unwrap();
    assert!(matches!(load_report_config(&toml), Err(ConfigError::UnsupportedFormat(ext)) if ext == "toml"));

    let zero = dir.path().join("zero.json");
    fs::write(&zero, r#"{"top_functions": 0}"#).unwrap();
    assert!(matches!(load_report_config(&zero), Err(ConfigError::InvalidTopFunctions)));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{").unwrap();
    let err = load_report_config(&broken).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("broken.json"));

    let missing = dir.path().join("missing.yaml");
    assert!(matches!(load_report_config(&missing), Err(ConfigError::Io { .. })));
}
