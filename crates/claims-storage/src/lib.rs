//! Disk-backed document storage for the claims service.
//!
//! Blobs live under a single root directory with two subdirectories:
//! `staging/` for files written before their database rows commit, and
//! `uploads/` for promoted files served publicly. Keys are generated
//! server-side and never derived from client input.

pub mod local;
pub mod traits;

pub use local::LocalStorage;
pub use traits::{ByteStream, StagedBlob, Storage, StorageError, StorageResult};
