//! Domain models and API response shapes

pub mod claim;
pub mod document;

pub use claim::{Claim, ClaimStatus, ClaimWithDocuments, NewClaim};
pub use document::{Document, DocumentListing, NewDocument, StoredDocument, SubmissionResponse};
