//! Claim submission workflow
//!
//! Orchestrates validate -> stage -> persist -> promote. Blobs are written
//! to the staging area first; the claim and document rows go into one
//! database transaction; staged blobs become publicly readable only after
//! that transaction commits. On any failure after staging, every staged
//! blob from this request is discarded (best-effort compensating cleanup)
//! and no claim row survives.

use crate::extract::UploadedFile;
use crate::state::AppState;
use chrono::Utc;
use claims_core::models::{NewDocument, StoredDocument, SubmissionResponse};
use claims_core::validation::{validate_submission, SubmissionForm};
use claims_core::AppError;
use claims_storage::StagedBlob;

pub struct SubmissionService<'a> {
    state: &'a AppState,
}

impl<'a> SubmissionService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn submit(
        &self,
        form: SubmissionForm,
        files: Vec<UploadedFile>,
    ) -> Result<SubmissionResponse, AppError> {
        let today = Utc::now().date_naive();
        let new_claim = validate_submission(&form, files.len(), today)?;

        let mut staged: Vec<StagedBlob> = Vec::with_capacity(files.len());
        for file in files {
            match self
                .state
                .storage
                .stage(&file.original_name, file.data)
                .await
            {
                Ok(blob) => staged.push(blob),
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        original_name = %file.original_name,
                        "Failed to stage uploaded blob"
                    );
                    self.discard_all(&staged).await;
                    return Err(AppError::Storage(format!(
                        "Failed to store uploaded file: {}",
                        e
                    )));
                }
            }
        }

        let documents: Vec<NewDocument> = staged
            .iter()
            .map(|blob| NewDocument {
                file_name: blob.original_name.clone(),
                file_path: blob.key.clone(),
            })
            .collect();

        let created = match self
            .state
            .claims
            .create_with_documents(&new_claim, &documents)
            .await
        {
            Ok(created) => created,
            Err(e) => {
                self.discard_all(&staged).await;
                return Err(e);
            }
        };

        // Rows are committed; a promote failure here only means the blob
        // stays unreadable and listings will report file_exists = false.
        for blob in &staged {
            if let Err(e) = self.state.storage.promote(&blob.key).await {
                tracing::error!(
                    error = %e,
                    key = %blob.key,
                    claim_id = %created.claim.claim_id,
                    "Failed to promote staged blob after commit"
                );
            }
        }

        tracing::info!(
            claim_id = %created.claim.claim_id,
            document_count = created.documents.len(),
            "Claim submission complete"
        );

        Ok(SubmissionResponse {
            message: "Claim submitted successfully".to_string(),
            claim_id: created.claim.claim_id,
            documents: staged
                .into_iter()
                .map(|blob| StoredDocument {
                    original_name: blob.original_name,
                    stored_path: format!("/uploads/{}", blob.key),
                })
                .collect(),
        })
    }

    /// Best-effort cleanup of this request's staged blobs. Failures are
    /// logged and swallowed; cleanup must not mask the original error.
    async fn discard_all(&self, staged: &[StagedBlob]) {
        for blob in staged {
            if let Err(e) = self.state.storage.discard(&blob.key).await {
                tracing::warn!(
                    error = %e,
                    key = %blob.key,
                    "Failed to discard staged blob during cleanup"
                );
            }
        }
    }
}
