// wblogtool/src/restore/mod.rs
mod logic;

use crate::context::AppContext;
use crate::errors::RestoreError;

/// Public entry point for a restore: fetch the named snapshot, decrypt it,
/// and atomically replace the local data file with it.
///
/// Operator-triggered only; never scheduled. Any failure aborts with no
/// partial write visible to the rest of the system.
pub async fn run_restore_flow(ctx: &AppContext, artifact_name: &str) -> Result<(), RestoreError> {
    logic::perform_restore(ctx, artifact_name).await
}
