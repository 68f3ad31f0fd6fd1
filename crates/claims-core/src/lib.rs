//! Claims Core Library
//!
//! Core domain models, error types, configuration, and validation shared
//! across all claims-service components.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, LogLevel};
pub use validation::ValidationError;
