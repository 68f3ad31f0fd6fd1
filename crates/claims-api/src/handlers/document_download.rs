use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use claims_core::AppError;
use claims_storage::StorageError;
use futures::StreamExt;
use std::sync::Arc;

/// Content type for serving, derived from the stored key's extension. The
/// allowlist at upload time keeps this to three types in practice.
fn content_type_of(file_path: &str) -> &'static str {
    match file_path.rsplit('.').next() {
        Some("pdf") => "application/pdf",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

/// `GET /api/documents/{document_id}`: streams the blob; 404 when either
/// the document row or the underlying file is gone.
pub async fn download_document(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<i64>,
) -> Result<Response, HttpAppError> {
    let document = state
        .claims
        .get_document(document_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Document {} not found", document_id)))?;

    let stream = state
        .storage
        .read_stream(&document.file_path)
        .await
        .map_err(|e| match e {
            StorageError::NotFound(_) | StorageError::InvalidKey(_) => {
                AppError::NotFound(format!("Document {} file is missing", document_id))
            }
            other => {
                tracing::error!(
                    error = %other,
                    file_path = %document.file_path,
                    "Failed to open document blob"
                );
                AppError::Storage(other.to_string())
            }
        })?;

    let body_stream =
        stream.map(|chunk| chunk.map_err(|e| std::io::Error::other(e.to_string())));

    // file_name is client-supplied; strip quotes so it cannot break out of
    // the header value.
    let safe_name: String = document
        .file_name
        .chars()
        .filter(|c| !c.is_control() && *c != '"')
        .collect();

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_of(&document.file_path))
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", safe_name),
        )
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build download response");
            AppError::Internal(e.to_string())
        })?;

    Ok(response)
}
