//! HTTP surface of the claims service.
//!
//! The binary in `main.rs` is a thin shell around `setup::initialize_app`,
//! which is also what the integration tests drive: readiness gate,
//! migrations, storage, state, and router are all constructed there.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
