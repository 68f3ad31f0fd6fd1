//! Error types module
//!
//! All errors are unified under the `AppError` enum, which can represent
//! database, storage, validation, and workflow errors. Each variant knows its
//! HTTP status code, a stable machine-readable code, and the level it should
//! be logged at, so the HTTP boundary can render every error uniformly.

use crate::validation::ValidationError;
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors like validation failures
    Debug,
    /// Recoverable issues like rejected state transitions
    Warn,
    /// Unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid status transition: claim {claim_id} is {current}, not pending")]
    InvalidTransition { claim_id: String, current: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::Validation(_) | AppError::InvalidInput(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::InvalidTransition { .. } => 409,
            AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(v) => v.error_code(),
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidTransition { .. } => "INVALID_TRANSITION",
            AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => {
                "SUBMISSION_FAILED"
            }
        }
    }

    /// Client-facing message. Internal failures are collapsed to a generic
    /// message; the detailed cause only goes to the log.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Validation(v) => v.to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::InvalidTransition { claim_id, current } => format!(
                "Claim {} is already {} and cannot be re-processed",
                claim_id, current
            ),
            AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => {
                "Failed to process request".to_string()
            }
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation(_) | AppError::InvalidInput(_) | AppError::NotFound(_) => {
                LogLevel::Debug
            }
            AppError::InvalidTransition { .. } => LogLevel::Warn,
            AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => LogLevel::Error,
        }
    }
}

impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}
