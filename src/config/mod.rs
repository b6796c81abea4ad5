//! Configuration module for EntityG
//!
//! Configuration hierarchy:
//! 1. CLI `--set key=value` (highest priority)
//! 2. Environment variables (ENTITYG_*)
//! 3. Config file: `--config`, `./entityg.toml`, or `~/.config/entityg/config.toml`
//! 4. Built-in defaults (lowest priority)

mod loader;
mod options;
mod types;

use std::path::PathBuf;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{
    discover, user_config_path, with_overrides_from, LoadedConfig, CONFIG_FILE_NAME, ENV_PREFIX,
};
pub use options::{apply_option, option_keys, parse_assignment, OPTION_SETTERS};
pub use types::{ColumnMapping, Config, CsvConfig, DatabaseConfig, GraphConfig, SourceConfig};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {file}: {message}")]
    Parse { file: PathBuf, message: String },

    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("unknown option '{key}'{}", .suggestion.as_ref().map(|s| format!(" (did you mean '{}'?)", s)).unwrap_or_default())]
    UnknownOption {
        key: String,
        suggestion: Option<String>,
    },

    #[error("option '{key}' is not supported\n  → Fix: Point `database_path` at a SQLite file instead")]
    Unsupported { key: String },

    #[error("expected key=value, got '{0}'")]
    InvalidAssignment(String),

    #[error("no data file configured for the {source_type} source\n  → Fix: Set `{key}`")]
    MissingDataFile { source_type: String, key: String },

    #[error("no starting entity configured\n  → Fix: Pass --seed or set `source.first_node_entry`")]
    MissingSeed,
}
