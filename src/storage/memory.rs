// wblogtool/src/storage/memory.rs
//! In-memory artifact store used by the engine tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

use crate::errors::StorageError;
use crate::storage::{ArtifactStore, UploadReceipt};

#[derive(Default)]
pub struct MemoryArtifactStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    pub uploads: AtomicUsize,
    pub fetches: AtomicUsize,
    pub fail_uploads: AtomicBool,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, name: &str, payload: Vec<u8>) {
        self.objects.lock().await.insert(name.to_string(), payload);
    }

    pub async fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.objects.lock().await.get(name).cloned()
    }

    pub async fn names(&self) -> Vec<String> {
        self.objects.lock().await.keys().cloned().collect()
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn upload(&self, name: &str, payload: Vec<u8>) -> Result<UploadReceipt, StorageError> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::NetworkFailure(
                "simulated upload outage".to_string(),
            ));
        }
        let size = payload.len() as u64;
        self.insert(name, payload).await;
        Ok(UploadReceipt {
            name: name.to_string(),
            size,
        })
    }

    async fn fetch(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.get(name).await.ok_or_else(|| {
            StorageError::NetworkFailure(format!("download of {} returned HTTP 404", name))
        })
    }
}
