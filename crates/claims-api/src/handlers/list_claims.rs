use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use claims_core::models::{ClaimStatus, ClaimWithDocuments};
use claims_core::AppError;
use claims_db::ClaimFilter;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub employee_id: Option<String>,
    pub claim_id: Option<String>,
    pub status: Option<String>,
}

/// `GET /api/claims`: conjunctively filtered listing, newest first, each
/// claim enriched with its documents.
pub async fn list_claims(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ClaimWithDocuments>>, HttpAppError> {
    let status = match query.status.as_deref() {
        None | Some("") => None,
        Some("pending") => Some(ClaimStatus::Pending),
        Some("approved") => Some(ClaimStatus::Approved),
        Some("rejected") => Some(ClaimStatus::Rejected),
        Some(other) => {
            return Err(AppError::InvalidInput(format!(
                "Unknown status filter: {}",
                other
            ))
            .into())
        }
    };

    let filter = ClaimFilter {
        employee_id: query.employee_id.filter(|s| !s.is_empty()),
        claim_id: query.claim_id.filter(|s| !s.is_empty()),
        status,
    };

    let claims = state.claims.list_claims(&filter).await?;
    Ok(Json(claims))
}
