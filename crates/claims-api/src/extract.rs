//! Multipart form extraction for claim submissions
//!
//! Pulls the claim fields and up to `max_documents_per_claim` file parts out
//! of the request. Per-file content-type and size checks run here, while the
//! request body is being read, so an unsupported or oversized file is
//! rejected before anything touches disk or the database.

use axum::extract::Multipart;
use claims_core::validation::SubmissionForm;
use claims_core::{AppError, Config, ValidationError};

/// One buffered file part from the `documents` field.
pub struct UploadedFile {
    pub original_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

pub async fn parse_claim_form(
    mut multipart: Multipart,
    config: &Config,
) -> Result<(SubmissionForm, Vec<UploadedFile>), AppError> {
    let mut form = SubmissionForm::default();
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart form: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "documents" {
            if files.len() >= config.max_documents_per_claim {
                return Err(AppError::InvalidInput(format!(
                    "At most {} documents are allowed per claim",
                    config.max_documents_per_claim
                )));
            }

            let original_name = field
                .file_name()
                .unwrap_or("unnamed")
                .to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_lowercase();

            // Reject on the declared type before buffering the bytes.
            if !config
                .allowed_content_types
                .iter()
                .any(|ct| *ct == content_type)
            {
                return Err(ValidationError::UnsupportedType(content_type).into());
            }

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?
                .to_vec();

            if data.len() > config.max_document_size_bytes {
                let limit_mib = (config.max_document_size_bytes / 1024 / 1024) as u64;
                return Err(ValidationError::TooLarge(original_name, limit_mib).into());
            }

            files.push(UploadedFile {
                original_name,
                content_type,
                data,
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read field {}: {}", name, e)))?;

        match name.as_str() {
            "empName" => form.employee_name = Some(value),
            "empEmail" => form.employee_email = Some(value),
            "empId" => form.employee_id = Some(value),
            "department" => form.department = Some(value),
            "claimDate" => form.claim_date = Some(value),
            "amount" => form.amount = Some(value),
            "description" => form.description = Some(value),
            "type" => form.claim_type = Some(value),
            // Unknown fields are ignored, matching lenient form parsing.
            _ => {}
        }
    }

    Ok((form, files))
}
