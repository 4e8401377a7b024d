// wblogtool/src/backup/mod.rs
mod logic;

use crate::context::AppContext;
use crate::errors::BackupError;

/// Public entry point for one backup run: read the data file, encrypt it,
/// and ship it to the object store under a timestamped name.
///
/// Returns the uploaded artifact name. No retries happen inside a run; a
/// failure is reported to the caller and the next scheduled tick starts over
/// from scratch.
pub async fn run_backup_flow(ctx: &AppContext) -> Result<String, BackupError> {
    logic::perform_backup(ctx).await
}
