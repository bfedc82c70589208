use anyhow::Context;
use tm_config::TmConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration and apply global CLI overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<TmConfig> {
    let mut config = TmConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(path) = &flags.database {
        config.database.path.clone_from(path);
    }
    config.validate().context("invalid configuration")?;
    tracing::debug!(database = %config.database.path, "configuration loaded");
    Ok(config)
}
