use anyhow::Context;
use serde::Serialize;
use tm_config::TmConfig;
use tm_db::TmDb;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct MigrateResponse<'a> {
    database: &'a str,
    status: &'static str,
}

/// Open the configured database, which applies any pending migrations.
pub async fn handle(config: &TmConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let path = config.database.path.as_str();
    TmDb::open_local(path)
        .await
        .with_context(|| format!("failed to migrate database at {path}"))?;
    tracing::info!(path, "database schema is up to date");

    output(
        &MigrateResponse {
            database: path,
            status: "migrated",
        },
        flags.format,
    )
}
