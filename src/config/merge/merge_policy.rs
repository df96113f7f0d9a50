//! Merge rules: defaults, override order, conflict handling.
//!
//! Later sources win: defaults, then the config file, then `RSYNCX_*`
//! environment variables.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Ok(Config::builder()
        .set_default("scan.ignore_patterns", Vec::<String>::new())?
        .set_default("scan.sort_by_name", true)?
        .set_default("output.format", "text")?
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")?)
}
