use crate::traits::{ByteStream, StagedBlob, Storage, StorageError, StorageResult};
use futures::StreamExt;
use rand::Rng;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Field tag prefixed to every generated key; mirrors the multipart field
/// the blobs arrive under.
const KEY_PREFIX: &str = "documents";

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    uploads_dir: PathBuf,
    staging_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at `base_path`, creating the
    /// `uploads/` and `staging/` subdirectories if needed.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        let uploads_dir = base_path.join("uploads");
        let staging_dir = base_path.join("staging");

        for dir in [&uploads_dir, &staging_dir] {
            fs::create_dir_all(dir).await.map_err(|e| {
                StorageError::ConfigError(format!(
                    "Failed to create storage directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        Ok(LocalStorage {
            uploads_dir,
            staging_dir,
        })
    }

    /// Directory promoted blobs are served from (mounted at `/uploads`).
    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    /// Generate a practically unique key: field tag, current time in
    /// milliseconds, a random integer, and the original extension.
    fn generate_key(original_name: &str) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let nonce: u32 = rand::rng().random_range(0..1_000_000_000);
        match extension_of(original_name) {
            Some(ext) => format!("{}-{}-{}.{}", KEY_PREFIX, millis, nonce, ext),
            None => format!("{}-{}-{}", KEY_PREFIX, millis, nonce),
        }
    }

    /// Resolve a key below `dir`, rejecting anything that could escape it.
    /// Keys are server-generated single file names; separators or dot
    /// segments mean the key came from somewhere it shouldn't have.
    fn key_to_path(&self, dir: &Path, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty()
            || key.contains('/')
            || key.contains('\\')
            || key.contains("..")
            || key.starts_with('.')
        {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(dir.join(key))
    }
}

/// Lowercased alphanumeric extension of a filename, if it has a usable one.
fn extension_of(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?.to_lowercase();
    if ext.is_empty() || ext.len() > 8 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext)
}

#[async_trait::async_trait]
impl Storage for LocalStorage {
    async fn stage(&self, original_name: &str, data: Vec<u8>) -> StorageResult<StagedBlob> {
        let key = Self::generate_key(original_name);
        let path = self.key_to_path(&self.staging_dir, &key)?;
        let size = data.len();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        file.write_all(&data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;
        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::debug!(key = %key, size_bytes = size, "Staged blob");

        Ok(StagedBlob {
            key,
            original_name: original_name.to_string(),
        })
    }

    async fn promote(&self, key: &str) -> StorageResult<()> {
        let from = self.key_to_path(&self.staging_dir, key)?;
        let to = self.key_to_path(&self.uploads_dir, key)?;

        fs::rename(&from, &to).await.map_err(|e| {
            StorageError::WriteFailed(format!(
                "Failed to promote {} to {}: {}",
                from.display(),
                to.display(),
                e
            ))
        })?;

        tracing::debug!(key = %key, "Promoted blob to uploads");
        Ok(())
    }

    async fn discard(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(&self.staging_dir, key)?;
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }
        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to discard {}: {}", path.display(), e))
        })?;
        tracing::debug!(key = %key, "Discarded staged blob");
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(&self.uploads_dir, key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn read_stream(&self, key: &str) -> StorageResult<ByteStream> {
        let path = self.key_to_path(&self.uploads_dir, key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(key.to_string()));
        }

        let file = fs::File::open(&path).await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to open file {}: {}", path.display(), e))
        })?;

        let stream = tokio_util::io::ReaderStream::new(file).map(|result| {
            result.map_err(|e| StorageError::ReadFailed(format!("Failed to read chunk: {}", e)))
        });

        Ok(Box::pin(stream))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(&self.uploads_dir, key)?;
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }
        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete {}: {}", path.display(), e))
        })?;
        tracing::debug!(key = %key, "Deleted blob");
        Ok(())
    }
}
