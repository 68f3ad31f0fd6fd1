//! Readiness gate
//!
//! Boot-time probe loop: connect to the database and issue a trivial
//! liveness query, retrying on a fixed interval a bounded number of times.
//! Exhausting the attempts is fatal to the caller; nothing else in the
//! process retries transient database failures.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

pub async fn wait_for_database(
    database_url: &str,
    max_connections: u32,
    max_attempts: u32,
    interval: Duration,
) -> Result<SqlitePool, sqlx::Error> {
    // foreign_keys is per-connection in SQLite and the documents table
    // relies on ON DELETE CASCADE.
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut last_error: Option<sqlx::Error> = None;
    for attempt in 1..=max_attempts {
        match probe(&options, max_connections).await {
            Ok(pool) => {
                tracing::info!(attempt, "Database ready");
                return Ok(pool);
            }
            Err(e) => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %e,
                    "Database not ready, retrying"
                );
                last_error = Some(e);
                if attempt < max_attempts {
                    tokio::time::sleep(interval).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| sqlx::Error::PoolClosed))
}

async fn probe(
    options: &SqliteConnectOptions,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options.clone())
        .await?;
    sqlx::query("SELECT 1").execute(&pool).await?;
    Ok(pool)
}
