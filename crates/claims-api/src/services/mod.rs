//! Request-scoped services

pub mod submission;

pub use submission::SubmissionService;
