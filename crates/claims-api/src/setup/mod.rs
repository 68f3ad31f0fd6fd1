//! Application setup and initialization
//!
//! Everything the binary (and the integration tests) need to bring the
//! service up: tracing, readiness-gated database connection, migrations,
//! blob storage, state, and routes. The order matters: the listener is
//! only bound in `server::start_server` after all of this has succeeded, so
//! no request can observe an uninitialized schema.

pub mod database;
pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use claims_core::Config;
use claims_db::ClaimRepository;
use claims_storage::LocalStorage;
use std::sync::Arc;

/// Initialize the tracing subscriber from `RUST_LOG`. Safe to call more
/// than once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .try_init();
}

/// Initialize the entire application: readiness gate, migrations, storage,
/// state, routes.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let pool = database::setup_database(&config)
        .await
        .context("Storage engine unavailable")?;

    let storage = LocalStorage::new(&config.upload_dir)
        .await
        .context("Failed to initialize document storage")?;
    let uploads_dir = storage.uploads_dir().to_path_buf();

    let state = Arc::new(AppState {
        config: config.clone(),
        pool: pool.clone(),
        claims: ClaimRepository::new(pool),
        storage: Arc::new(storage),
    });

    let router = routes::setup_routes(&config, state.clone(), &uploads_dir)?;

    Ok((state, router))
}
