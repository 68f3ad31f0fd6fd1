use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use claims_core::models::{Claim, ClaimStatus};
use claims_core::AppError;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// `PATCH /api/claims/{claim_id}`: apply a review decision. Only
/// `approved` and `rejected` are valid targets, and only pending claims can
/// transition (a non-pending claim yields 409).
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(claim_id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<Claim>, HttpAppError> {
    let status = ClaimStatus::parse_decision(&body.status).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "Invalid status '{}'. Must be 'approved' or 'rejected'",
            body.status
        ))
    })?;

    let claim = state.claims.update_status(&claim_id, status).await?;
    Ok(Json(claim))
}
