//! Error types for registry loading and configuration
//!
//! The construction engine itself never fails; these cover the surfaces around it.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fallible error-trace operations
pub type Result<T> = std::result::Result<T, TraceError>;

/// Errors raised while loading registrations or configuration
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Unable to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Blob is not a JSON or YAML collection of error messages: {0}")]
    UnsupportedBlob(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}
