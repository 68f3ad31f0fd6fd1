//! Validation modules

pub mod claim;

pub use claim::{
    validate_submission, SubmissionForm, ValidationError, CLAIM_DATE_WINDOW_MONTHS, MAX_AMOUNT,
};
