//! Error types for tree scanning and the command-line surface.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a tree build
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid root: {0}")]
    InvalidRoot(String),

    #[error("Failed to list directory {path:?}: {source}")]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read metadata for {path:?}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was opened but reading it failed part way through.
    #[error("Failed to read file {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors surfaced by configuration, logging setup and command execution
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Scan error: {0}")]
    ScanError(#[from] ScanError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Output error: {0}")]
    OutputError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::OutputError(err.to_string())
    }
}
