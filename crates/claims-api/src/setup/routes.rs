//! Route and middleware assembly

use crate::handlers;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, patch, post};
use axum::Router;
use claims_core::Config;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
    uploads_dir: &Path,
) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    // Body limit leaves room for every allowed document plus form fields,
    // so the per-file TooLarge check is the one that fires.
    let body_limit =
        config.max_document_size_bytes * config.max_documents_per_claim + 64 * 1024;

    let router = Router::new()
        .route(
            "/api/claims",
            post(handlers::submit_claim).get(handlers::list_claims),
        )
        .route(
            "/api/claims/{claim_id}/documents",
            get(handlers::list_claim_documents),
        )
        .route("/api/claims/{claim_id}", patch(handlers::update_status))
        .route(
            "/api/documents/{document_id}",
            get(handlers::download_document),
        )
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    Ok(router)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .map(|o| o.parse())
            .collect::<Result<_, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
