//! Data access layer for the claims service.
//!
//! `ClaimRepository` owns every query against the `claims` and `documents`
//! tables; `readiness` holds the boot-time probe loop that gates the rest of
//! the process on a reachable database.

pub mod claims;
pub mod readiness;

pub use claims::{ClaimFilter, ClaimRepository};
pub use readiness::wait_for_database;
