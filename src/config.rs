//! Configuration System
//!
//! Layered configuration built with the `config` crate: built-in defaults, an
//! optional TOML file, then `RSYNCX_*` environment overrides. Command-line
//! flags are applied on top by the binary.

use crate::logging::LoggingConfig;
use crate::tree::walker::WalkerConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsyncxConfig {
    /// Tree scanning settings
    #[serde(default)]
    pub scan: WalkerConfig,

    /// Command output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How commands render their result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// text or json
    #[serde(default = "default_output_format")]
    pub format: String,
}

fn default_output_format() -> String {
    "text".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Scan(String),
    Output(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Scan(msg) => write!(f, "Scan: {}", msg),
            ValidationError::Output(msg) => write!(f, "Output: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl RsyncxConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for pattern in &self.scan.ignore_patterns {
            if pattern.trim().is_empty() {
                errors.push(ValidationError::Scan(
                    "Ignore pattern cannot be empty".to_string(),
                ));
            } else if pattern.contains('/') || pattern.contains('\\') {
                errors.push(ValidationError::Scan(format!(
                    "Ignore pattern '{}' must be a single entry name, not a path",
                    pattern
                )));
            }
        }

        if self.output.format != "text" && self.output.format != "json" {
            errors.push(ValidationError::Output(format!(
                "Invalid output format '{}' (must be 'text' or 'json')",
                self.output.format
            )));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
