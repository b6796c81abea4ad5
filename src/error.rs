//! Error types for EntityG
//!
//! Each layer owns a `thiserror` enum; this module gathers them under one
//! crate-level type for callers that do not care which layer failed.

use thiserror::Error;

use crate::application::SessionError;
use crate::config::ConfigError;
use crate::domain::entities::TreeError;
use crate::domain::ports::{LoadError, RowSourceError, SetupError};

/// Result type alias for EntityG operations
pub type EntityGResult<T> = Result<T, EntityGError>;

#[derive(Error, Debug)]
pub enum EntityGError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    RowSource(#[from] RowSourceError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_error_message_passes_through() {
        let err: EntityGError = SetupError::NoMatchingRow {
            column: "Name".to_string(),
            value: "Zed".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "no row where Name = 'Zed'");
    }

    #[test]
    fn missing_template_includes_fix_hint() {
        let err: EntityGError = SetupError::MissingFilterTemplate.into();
        assert!(err.to_string().contains("→ Fix:"));
    }

    #[test]
    fn load_error_wraps_backing_store() {
        let err: EntityGError =
            LoadError::from(RowSourceError::Query("no such table: people".to_string())).into();
        assert_eq!(
            err.to_string(),
            "backing store error: query failed: no such table: people"
        );
    }
}
