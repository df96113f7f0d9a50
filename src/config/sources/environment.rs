//! Environment source: `RSYNCX_<SECTION>__<KEY>` variables.
//!
//! For example `RSYNCX_SCAN__SORT_BY_NAME=false` or `RSYNCX_OUTPUT__FORMAT=json`.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment};

pub const ENV_PREFIX: &str = "RSYNCX";

/// Add the environment override source to builder.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
