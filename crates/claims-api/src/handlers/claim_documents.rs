use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use claims_core::models::DocumentListing;
use std::sync::Arc;

/// `GET /api/claims/{claim_id}/documents`: each document is annotated with
/// a live existence check; the public URL is only emitted while the blob is
/// actually on disk.
pub async fn list_claim_documents(
    State(state): State<Arc<AppState>>,
    Path(claim_id): Path<String>,
) -> Result<Json<Vec<DocumentListing>>, HttpAppError> {
    let documents = state.claims.list_documents(&claim_id).await?;

    let mut listings = Vec::with_capacity(documents.len());
    for doc in documents {
        let file_exists = state.storage.exists(&doc.file_path).await.unwrap_or(false);
        let url = file_exists.then(|| state.config.document_url(&doc.file_path));
        listings.push(DocumentListing::from_document(doc, file_exists, url));
    }

    Ok(Json(listings))
}
