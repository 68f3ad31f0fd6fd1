//! HTTP handlers, one file per endpoint

pub mod claim_documents;
pub mod document_download;
pub mod list_claims;
pub mod submit_claim;
pub mod update_status;

pub use claim_documents::list_claim_documents;
pub use document_download::download_document;
pub use list_claims::list_claims;
pub use submit_claim::submit_claim;
pub use update_status::update_status;
