//! Error types for the cell registry.
//!
//! Placement and query misses are not errors; they return `None`.
//! These variants cover configuration and bad handles only.

use thiserror::Error;

use crate::cells::CellId;

/// Result type alias using [`RegistryError`].
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Top-level error type for the registry and its data files.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Configuration or catalog text could not be parsed.
    #[error("Failed to parse {what}: {source}")]
    ConfigParse {
        /// What was being parsed.
        what: &'static str,
        /// Underlying RON error.
        #[source]
        source: ron::error::SpannedError,
    },

    /// Configuration parsed but holds unusable values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No live cell has this id.
    #[error("Cell not found: {0}")]
    CellNotFound(CellId),

    /// No blueprint is registered under this id.
    #[error("Unknown blueprint: {0}")]
    UnknownBlueprint(String),
}
