use crate::error::HttpAppError;
use crate::extract::parse_claim_form;
use crate::services::SubmissionService;
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use claims_core::models::SubmissionResponse;
use std::sync::Arc;

/// `POST /api/claims`: multipart claim submission with up to 5 supporting
/// documents under the `documents` field.
pub async fn submit_claim(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SubmissionResponse>), HttpAppError> {
    let (form, files) = parse_claim_form(multipart, &state.config).await?;
    let response = SubmissionService::new(&state).submit(form, files).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
