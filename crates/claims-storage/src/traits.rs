//! Storage abstraction trait
//!
//! Defines the `Storage` trait the claim workflow depends on. The only
//! implementation today is the local filesystem, but the repository and
//! workflow service are written against this seam.

use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Streamed blob contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// A blob written to the staging area, awaiting promotion or discard.
#[derive(Debug, Clone)]
pub struct StagedBlob {
    /// Generated storage key, unique per blob.
    pub key: String,
    /// Original client-supplied name, display-only.
    pub original_name: String,
}

/// Storage abstraction for claim documents.
///
/// The write lifecycle is stage -> (promote | discard): `stage` buffers the
/// blob outside the public directory, `promote` makes it readable once the
/// owning database transaction has committed, and `discard` is the
/// compensating cleanup for failed submissions. Reads (`exists`,
/// `read_stream`) only see promoted blobs.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Write a blob to the staging area under a freshly generated key.
    async fn stage(&self, original_name: &str, data: Vec<u8>) -> StorageResult<StagedBlob>;

    /// Move a staged blob into the public uploads directory.
    async fn promote(&self, key: &str) -> StorageResult<()>;

    /// Remove a staged blob. Missing files are fine; this is the cleanup
    /// path and must not introduce new failures of its own.
    async fn discard(&self, key: &str) -> StorageResult<()>;

    /// Whether a promoted blob currently exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Stream a promoted blob's contents.
    async fn read_stream(&self, key: &str) -> StorageResult<ByteStream>;

    /// Delete a promoted blob. Missing files are fine.
    async fn delete(&self, key: &str) -> StorageResult<()>;
}
