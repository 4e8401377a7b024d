// wblogtool/src/test_support.rs
//! Shared fixtures for the engine tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{AppConfig, ObjectStoreConfig};
use crate::context::AppContext;
use crate::storage::memory::MemoryArtifactStore;

pub const TEST_KEY: &str = "0123456789abcdef0123456789abcdef";

pub fn test_config(data_path: &Path) -> AppConfig {
    AppConfig {
        data_path: data_path.to_path_buf(),
        backup_key: TEST_KEY.to_string(),
        object_store: ObjectStoreConfig {
            endpoint_url: "https://nyc3.digitaloceanspaces.com".to_string(),
            region: "nyc3".to_string(),
            access_key_id: "AK".to_string(),
            secret_access_key: "SK".to_string(),
            bucket_name: "wblog-backups".to_string(),
            public_base_url: "https://cdn.example.com".to_string(),
        },
        site_url: "https://blog.example.com".to_string(),
        sitemap_path: PathBuf::from("static/sitemap.xml"),
    }
}

/// An `AppContext` wired to an in-memory store, plus a handle to the store
/// for asserting on uploads and fetches.
pub fn test_context(data_path: &Path) -> (AppContext, Arc<MemoryArtifactStore>) {
    let store = Arc::new(MemoryArtifactStore::new());
    let ctx = AppContext::new(test_config(data_path), store.clone());
    (ctx, store)
}
