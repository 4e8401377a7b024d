// wblogtool/src/context.rs
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::storage::ArtifactStore;

/// Read-only wiring shared by every backup/restore invocation and every
/// schedule tick.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn ArtifactStore>,
    /// Serializes access to the data file path. Backup holds it across its
    /// read and restore across its write, so a scheduled backup and an
    /// operator restore can never touch the file at the same time.
    pub data_lock: Arc<Mutex<()>>,
}

impl AppContext {
    pub fn new(config: AppConfig, store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            data_lock: Arc::new(Mutex::new(())),
        }
    }
}
