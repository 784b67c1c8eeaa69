use std::path::Path;

use anyhow::{Context, Result};
use verita_core::loader::load_runner_stderr;

/// Captured verifier stderr of one result file, or a placeholder line.
pub fn render_stderr(path: &Path) -> Result<String> {
    let stderr = load_runner_stderr(path)
        .with_context(|| format!("Failed to read stderr from {}", path.display()))?;
    Ok(match stderr {
        Some(text) if text.ends_with('\n') => text,
        Some(text) => format!("{text}\n"),
        None => "(no stderr recorded)\n".to_string(),
    })
}

pub fn stderr_command(path: &Path) -> Result<()> {
    print!("{}", render_stderr(path)?);
    Ok(())
}
