use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A supporting file linked to exactly one claim. `file_name` is the
/// client-supplied display name and is never trusted; `file_path` is the
/// server-generated storage key.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Document {
    pub id: i64,
    pub claim_id: String,
    pub file_name: String,
    pub file_path: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Document row data known before insert (id and timestamp are assigned by
/// the store).
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub file_name: String,
    pub file_path: String,
}

/// A document annotated with a live blob-existence check, as returned by
/// `GET /api/claims/{id}/documents`. `url` is only present while the blob
/// actually exists on disk.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentListing {
    pub id: i64,
    pub claim_id: String,
    pub file_name: String,
    pub file_path: String,
    pub uploaded_at: DateTime<Utc>,
    pub file_exists: bool,
    pub url: Option<String>,
}

impl DocumentListing {
    pub fn from_document(doc: Document, file_exists: bool, url: Option<String>) -> Self {
        DocumentListing {
            id: doc.id,
            claim_id: doc.claim_id,
            file_name: doc.file_name,
            file_path: doc.file_path,
            uploaded_at: doc.uploaded_at,
            file_exists,
            url,
        }
    }
}

/// One stored file as echoed back by a successful submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub original_name: String,
    pub stored_path: String,
}

/// Body of a 201 response to `POST /api/claims`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub message: String,
    pub claim_id: String,
    pub documents: Vec<StoredDocument>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_carries_url_only_when_blob_exists() {
        let doc = Document {
            id: 7,
            claim_id: "CLM-2026-0042".to_string(),
            file_name: "receipt.pdf".to_string(),
            file_path: "documents-1756400000000-12345.pdf".to_string(),
            uploaded_at: Utc::now(),
        };

        let live = DocumentListing::from_document(
            doc.clone(),
            true,
            Some("http://localhost:3000/uploads/documents-1756400000000-12345.pdf".to_string()),
        );
        assert!(live.file_exists);
        assert!(live.url.is_some());

        let gone = DocumentListing::from_document(doc, false, None);
        assert!(!gone.file_exists);
        assert_eq!(gone.url, None);
    }

    #[test]
    fn submission_response_uses_camel_case_wire_names() {
        let response = SubmissionResponse {
            message: "Claim submitted successfully".to_string(),
            claim_id: "CLM-2026-0042".to_string(),
            documents: vec![StoredDocument {
                original_name: "receipt.pdf".to_string(),
                stored_path: "/uploads/documents-1756400000000-12345.pdf".to_string(),
            }],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["claimId"], "CLM-2026-0042");
        assert_eq!(json["documents"][0]["originalName"], "receipt.pdf");
        assert_eq!(
            json["documents"][0]["storedPath"],
            "/uploads/documents-1756400000000-12345.pdf"
        );
    }
}
