//! Log file used while the TUI owns the terminal.
//!
//! Tracing output written to stderr would corrupt the alternate screen, so
//! the binary points its subscriber at this file for interactive sessions.

use std::env;
use std::fs::{File, OpenOptions, create_dir_all};
use std::path::PathBuf;

use anyhow::Context;
use toolstrip_util::default_config_path;

/// Environment variable used to override the TUI log file path.
pub const TUI_LOG_PATH_ENV: &str = "TOOLSTRIP_LOG_PATH";

/// Resolves the log file path: the override variable when set and
/// non-empty, otherwise `logs/toolstrip.log` next to the config file.
pub fn resolve_log_path() -> PathBuf {
    if let Some(path) = env::var_os(TUI_LOG_PATH_ENV)
        && !path.is_empty()
    {
        return PathBuf::from(path);
    }

    let config_path = default_config_path();
    let base_directory = config_path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    base_directory.join("logs").join("toolstrip.log")
}

/// Opens the log file for appending, creating parent directories.
pub fn open_log_file() -> anyhow::Result<(File, PathBuf)> {
    let path = resolve_log_path();
    if let Some(parent) = path.parent() {
        create_dir_all(parent).with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    Ok((file, path))
}
