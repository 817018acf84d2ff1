//! Shared helpers for the toolstrip crates: configuration loading, the
//! resize debouncer, path expansion and terminal text measurement.

pub mod config;
pub mod debounce;
pub mod path_processing;
pub mod text_processing;

pub use config::{CONFIG_FILE_NAME, CONFIG_PATH_ENV, ConfigError, default_config_path, load_config, load_config_from, validate_config};
pub use debounce::Debouncer;
pub use path_processing::expand_tilde;
pub use text_processing::{display_width, truncate_to_width};
