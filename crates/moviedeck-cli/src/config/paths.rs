//! Config directory resolution.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Resolves the config/data directory.
///
/// - If `dir` is `Some`, returns it unchanged.
/// - Otherwise returns `~/.config/moviedeck`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_data_dir(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.clone());
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home).join(".config").join("moviedeck"))
}

/// Resolves the config file path (`{data_dir}/config.toml`).
///
/// # Errors
///
/// Returns an error if the data directory cannot be resolved.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    Ok(resolve_data_dir(dir)?.join("config.toml"))
}

/// Resolves the log directory used by the TUI (`{data_dir}/logs`).
///
/// # Errors
///
/// Returns an error if the data directory cannot be resolved.
pub fn resolve_log_dir(dir: Option<&PathBuf>) -> Result<PathBuf> {
    Ok(resolve_data_dir(dir)?.join("logs"))
}
