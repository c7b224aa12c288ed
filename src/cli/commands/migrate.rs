use anyhow::Context;
use serde_json::Map;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::config;
use crate::database::DatabaseManager;

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config().database)
        .await
        .context("failed to connect to Postgres")?;

    DatabaseManager::migrate(&pool).await.context("migration failed")?;

    output_success(output_format, "Migrations applied", Map::new())
}
