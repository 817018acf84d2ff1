//! Toolbar configuration loading.
//!
//! The configuration is a small JSON document (see `ToolbarConfig`). It is
//! read from, in order of precedence:
//!
//! 1. an explicit path passed by the caller (the `--config` flag),
//! 2. the path in `TOOLSTRIP_CONFIG_PATH`,
//! 3. `<config dir>/toolstrip/toolbar.json`.
//!
//! A missing file at the default location yields the built-in defaults.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::config_dir;
use thiserror::Error;
use toolstrip_types::ToolbarConfig;
use tracing::{debug, info};

use crate::expand_tilde;

/// Environment variable allowing callers to override the configuration path.
pub const CONFIG_PATH_ENV: &str = "TOOLSTRIP_CONFIG_PATH";

/// Default filename for the JSON payload.
pub const CONFIG_FILE_NAME: &str = "toolbar.json";

/// Error surfaced when reading or validating the configuration fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure (for example, permissions or a missing explicit path).
    #[error("config I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid configuration document.
    #[error("config parse error at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The document parsed but violates an item contract.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Resolves the configuration path from the environment or the platform
/// configuration directory.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolstrip")
        .join(CONFIG_FILE_NAME)
}

/// Loads the configuration from `explicit` or the default location.
///
/// An explicit path must exist; the default path may be absent.
pub fn load_config(explicit: Option<&Path>) -> Result<ToolbarConfig, ConfigError> {
    match explicit {
        Some(path) => load_config_from(path),
        None => {
            let path = default_config_path();
            if !path.exists() {
                debug!(path = %path.display(), "no toolbar config found; using defaults");
                return Ok(ToolbarConfig::default());
            }
            load_config_from(&path)
        }
    }
}

/// Reads and validates the configuration at `path`.
pub fn load_config_from(path: &Path) -> Result<ToolbarConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ToolbarConfig = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_config(&config)?;
    info!(path = %path.display(), items = config.items.len(), "loaded toolbar config");
    Ok(config)
}

/// Rejects empty and duplicate item ids.
///
/// Item identity drives layout invalidation, so it is checked once here
/// rather than inside the widget.
pub fn validate_config(config: &ToolbarConfig) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for item in &config.items {
        let id = item.id();
        if id.trim().is_empty() {
            return Err(ConfigError::Invalid("toolbar item with an empty id".to_string()));
        }
        if !seen.insert(id) {
            return Err(ConfigError::Invalid(format!("duplicate toolbar item id '{id}'")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use toolstrip_types::ItemSpec;

    #[test]
    fn env_override_wins_over_config_dir() {
        temp_env::with_var(CONFIG_PATH_ENV, Some("/tmp/custom-toolbar.json"), || {
            assert_eq!(default_config_path(), PathBuf::from("/tmp/custom-toolbar.json"));
        });
    }

    #[test]
    fn blank_env_override_is_ignored() {
        temp_env::with_var(CONFIG_PATH_ENV, Some("   "), || {
            assert!(default_config_path().ends_with(Path::new("toolstrip").join(CONFIG_FILE_NAME)));
        });
    }

    #[test]
    fn missing_default_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        temp_env::with_var(CONFIG_PATH_ENV, Some(path.to_str().unwrap()), || {
            let config = load_config(None).unwrap();
            assert_eq!(config, ToolbarConfig::default());
        });
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let error = load_config(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert!(matches!(error, ConfigError::Io { .. }));
    }

    #[test]
    fn loads_items_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"{"width": 60, "items": [{"kind": "silence", "id": "silence"}, {"kind": "action", "id": "ack", "label": "Ack"}]}"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.width, Some(60));
        assert_eq!(config.items.len(), 2);
        assert_eq!(config.items[1], ItemSpec::action("ack", "Ack"));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "not json").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let config = ToolbarConfig {
            items: vec![ItemSpec::action("a", "A"), ItemSpec::action("a", "Again")],
            ..ToolbarConfig::default()
        };
        let error = validate_config(&config).unwrap_err();
        assert!(error.to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_empty_ids() {
        let config = ToolbarConfig {
            items: vec![ItemSpec::action(" ", "Blank")],
            ..ToolbarConfig::default()
        };
        assert!(matches!(validate_config(&config), Err(ConfigError::Invalid(_))));
    }
}
