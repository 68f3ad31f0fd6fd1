//! Database setup and initialization

use anyhow::{Context, Result};
use claims_core::Config;
use claims_db::wait_for_database;
use sqlx::SqlitePool;
use std::path::Path;

/// Gate on the storage engine being reachable, then run migrations. The
/// readiness gate is fatal after its bounded attempts; there is no partial
/// service.
pub async fn setup_database(config: &Config) -> Result<SqlitePool> {
    tracing::info!(database_url = %config.database_url, "Connecting to database...");
    let pool = wait_for_database(
        &config.database_url,
        config.db_max_connections,
        config.db_connect_max_attempts,
        config.db_connect_retry_interval,
    )
    .await
    .context("Database did not become ready")?;

    // Run pending migrations on startup (path: workspace migrations/ from crate root)
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
    let migrator = sqlx::migrate::Migrator::new(migrations_dir)
        .await
        .context("Failed to load migrations")?;
    migrator
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}
