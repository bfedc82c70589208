use anyhow::Context;
use tm_api::AppState;
use tm_config::TmConfig;
use tm_db::service::TmService;

use crate::cli::root_commands::ServeArgs;

/// Apply `serve` flag overrides on top of the loaded configuration.
pub fn apply_overrides(args: &ServeArgs, mut config: TmConfig) -> anyhow::Result<TmConfig> {
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate().context("invalid server options")?;
    Ok(config)
}

pub async fn handle(args: &ServeArgs, config: TmConfig) -> anyhow::Result<()> {
    let config = apply_overrides(args, config)?;

    let service = TmService::new_local(&config.database.path)
        .await
        .with_context(|| format!("failed to open database at {}", config.database.path))?;
    if config.database.is_in_memory() {
        tracing::warn!("serving from an in-memory database; data is lost on exit");
    }

    let addr = config.server.bind_address();
    tm_api::serve(AppState::new(service), &addr)
        .await
        .with_context(|| format!("server on {addr} failed"))
}
