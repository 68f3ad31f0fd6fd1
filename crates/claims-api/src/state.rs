//! Application state
//!
//! Every handler's dependencies are constructed once in `setup::` and
//! injected here; there are no module-global handles.

use claims_core::Config;
use claims_db::ClaimRepository;
use claims_storage::Storage;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: SqlitePool,
    pub claims: ClaimRepository,
    pub storage: Arc<dyn Storage>,
}
