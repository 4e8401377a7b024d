// wblogtool/src/storage/mod.rs
pub mod s3;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::errors::StorageError;

/// Confirmation of a completed upload.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub name: String,
    pub size: u64,
}

/// Port for the remote blob store holding backup artifacts.
///
/// The production implementation is [`s3::S3ArtifactStore`]; the engines only
/// depend on this trait, never on a concrete backend. Both operations are
/// pure network I/O with no local persistent state, and the caller treats any
/// non-success as total failure of the run.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Uploads `payload` under `name`. Each call obtains its own scoped,
    /// short-lived upload credential; credentials are never reused across
    /// backups.
    async fn upload(&self, name: &str, payload: Vec<u8>) -> Result<UploadReceipt, StorageError>;

    /// Fetches the artifact stored under `name` via the store's public,
    /// unauthenticated download side.
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, StorageError>;
}
