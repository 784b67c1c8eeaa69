pub mod commands;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use verita_core::config::{load_report_config, ReportConfig};

/// Install the stderr log subscriber.
///
/// `debug_level` counts `-d` flags: none shows warnings only, then info,
/// debug and trace. `RUST_LOG` directives take precedence.
pub fn init_tracing(debug_level: u8) {
    let level = match debug_level {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the report config (defaults when no file is given) and apply a
/// command-line `--top` override.
pub fn resolve_report_config(path: Option<&Path>, top: Option<usize>) -> Result<ReportConfig> {
    let config = match path {
        Some(path) => load_report_config(path)
            .with_context(|| format!("Failed to load report config {}", path.display()))?,
        None => ReportConfig::default(),
    };
    let config = match top {
        Some(top) => config.with_top_functions(top),
        None => config,
    };
    config.validate().context("Invalid report config")?;
    Ok(config)
}
