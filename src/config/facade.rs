//! Config loader: assembles defaults, file and environment sources.

use crate::config::merge::merge_policy;
use crate::config::sources::{environment, global_file};
use crate::config::RsyncxConfig;
use config::{ConfigError, File};
use std::path::Path;

/// Loads [`RsyncxConfig`] from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the global config file (if present) and environment overrides.
    pub fn load() -> Result<RsyncxConfig, ConfigError> {
        let global = global_file::global_config_path();
        Self::load_layers(global.as_deref())
    }

    /// Load defaults, the given (required) file and environment overrides.
    pub fn load_from_file(path: &Path) -> Result<RsyncxConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        environment::add_to_builder(builder)
            .build()?
            .try_deserialize()
    }

    /// Load defaults, an optional config file and environment overrides.
    pub fn load_layers(config_file: Option<&Path>) -> Result<RsyncxConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder, config_file);
        environment::add_to_builder(builder)
            .build()?
            .try_deserialize()
    }
}
