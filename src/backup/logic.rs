// wblogtool/src/backup/logic.rs
use chrono::{DateTime, Local};

use crate::context::AppContext;
use crate::crypto;
use crate::errors::BackupError;

/// Runs one backup: locate data file, read, encrypt, name, upload.
pub async fn perform_backup(ctx: &AppContext) -> Result<String, BackupError> {
    let data_path = &ctx.config.data_path;

    // Hold the data-file lock across the read so a concurrent restore cannot
    // replace the file mid-read.
    let plaintext = {
        let _guard = ctx.data_lock.lock().await;

        if !data_path.exists() {
            return Err(BackupError::SourceMissing(data_path.clone()));
        }

        println!("Starting backup of {}", data_path.display());

        // Whole-file read with no snapshotting against a live writer: a backup
        // taken mid-write may capture an inconsistent image. Accepted limitation.
        tokio::fs::read(data_path).await?
    };

    let ciphertext = crypto::encrypt(&plaintext, ctx.config.backup_key.as_bytes())?;
    let name = artifact_name(Local::now());

    let receipt = ctx.store.upload(&name, ciphertext).await?;
    println!(
        "✅ Backup uploaded: {} ({} bytes encrypted)",
        receipt.name, receipt.size
    );
    Ok(name)
}

/// Snapshot naming convention consumers match on the wire:
/// `wblog_<YYYYMMDDHHMMSS>.db`, local wall clock at second resolution.
fn artifact_name(now: DateTime<Local>) -> String {
    format!("wblog_{}.db", now.format("%Y%m%d%H%M%S"))
}
