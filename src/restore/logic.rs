// wblogtool/src/restore/logic.rs
use std::io::Write;
use std::path::Path;

use crate::context::AppContext;
use crate::crypto;
use crate::errors::RestoreError;

/// Runs one restore: fetch named snapshot, decrypt, atomically write to the
/// configured data path.
pub async fn perform_restore(ctx: &AppContext, artifact_name: &str) -> Result<(), RestoreError> {
    if artifact_name.trim().is_empty() {
        return Err(RestoreError::InvalidArgument);
    }

    println!("Fetching backup artifact {}", artifact_name);
    let body = ctx.store.fetch(artifact_name).await?;

    // Decryption doubles as the integrity gate: a corrupted or foreign
    // artifact fails here, before the live data file is touched.
    let plaintext = crypto::decrypt(&body, ctx.config.backup_key.as_bytes())
        .map_err(RestoreError::DecryptionFailed)?;

    // Exclusive access to the data path for the whole write step.
    let _guard = ctx.data_lock.lock().await;
    write_atomically(&ctx.config.data_path, &plaintext).map_err(RestoreError::WriteFailure)?;

    println!(
        "✅ Restored {} onto {} ({} bytes)",
        artifact_name,
        ctx.config.data_path.display(),
        plaintext.len()
    );
    Ok(())
}

/// Write-to-temp-then-rename so no reader ever observes a half-written data
/// file, and a crash mid-write leaves the previous file intact.
fn write_atomically(target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    // The temp file lives in the target's directory so the final rename
    // never crosses a filesystem boundary.
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup;
    use crate::context::AppContext;
    use crate::errors::StorageError;
    use crate::test_support::{test_config, test_context, TEST_KEY};
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn empty_artifact_name_is_rejected_before_any_network_call() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, store) = test_context(&dir.path().join("wblog.db"));

        assert!(matches!(
            perform_restore(&ctx, "").await,
            Err(RestoreError::InvalidArgument)
        ));
        assert!(matches!(
            perform_restore(&ctx, "   ").await,
            Err(RestoreError::InvalidArgument)
        ));
        assert_eq!(store.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_artifact_surfaces_as_network_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _store) = test_context(&dir.path().join("wblog.db"));

        match perform_restore(&ctx, "wblog_19990101000000.db").await {
            Err(RestoreError::Storage(StorageError::NetworkFailure(_))) => {}
            other => panic!("expected NetworkFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn tampered_artifact_fails_decryption_and_leaves_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("wblog.db");
        std::fs::write(&data_path, b"live data that must survive").unwrap();

        let (ctx, store) = test_context(&data_path);
        let sealed = crypto::encrypt(b"snapshot", TEST_KEY.as_bytes()).unwrap();
        let mut corrupted = sealed.clone();
        let last = corrupted.len() - 1;
        corrupted[last] ^= 0xff;
        store.insert("wblog_20240101000000.db", corrupted).await;

        match perform_restore(&ctx, "wblog_20240101000000.db").await {
            Err(RestoreError::DecryptionFailed(_)) => {}
            other => panic!("expected DecryptionFailed, got {:?}", other),
        }
        assert_eq!(
            std::fs::read(&data_path).unwrap(),
            b"live data that must survive"
        );
    }

    #[tokio::test]
    async fn backup_then_restore_reproduces_the_original_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let source_path = dir.path().join("wblog.db");
        let contents = b"SQLite format 3\0full round trip".to_vec();
        std::fs::write(&source_path, &contents).unwrap();

        let (ctx, store) = test_context(&source_path);
        let name = backup::run_backup_flow(&ctx).await.expect("backup succeeds");

        // Restore onto a fresh target path, sharing the same object store.
        let target_path = dir.path().join("restored").join("wblog.db");
        let restore_ctx = AppContext::new(test_config(&target_path), store);
        perform_restore(&restore_ctx, &name)
            .await
            .expect("restore succeeds");

        assert_eq!(std::fs::read(&target_path).unwrap(), contents);
    }

    #[tokio::test]
    async fn restore_replaces_an_existing_data_file_in_one_step() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("wblog.db");
        std::fs::write(&data_path, b"old generation").unwrap();

        let (ctx, store) = test_context(&data_path);
        let sealed = crypto::encrypt(b"new generation", TEST_KEY.as_bytes()).unwrap();
        store.insert("wblog_20240101000000.db", sealed).await;

        perform_restore(&ctx, "wblog_20240101000000.db")
            .await
            .expect("restore succeeds");
        assert_eq!(std::fs::read(&data_path).unwrap(), b"new generation");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn interrupted_write_leaves_the_original_file_untouched() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        let data_path = data_dir.join("wblog.db");
        std::fs::write(&data_path, b"previous generation").unwrap();

        let (ctx, store) = test_context(&data_path);
        let sealed = crypto::encrypt(b"next generation", TEST_KEY.as_bytes()).unwrap();
        store.insert("wblog_20240101000000.db", sealed).await;

        // A read-only directory makes the temp-file step fail partway through
        // the write, standing in for a crash before the rename.
        std::fs::set_permissions(&data_dir, std::fs::Permissions::from_mode(0o555)).unwrap();
        if std::fs::write(data_dir.join("probe"), b"x").is_ok() {
            // Running with privileges that bypass directory permissions
            // (e.g. root in CI); the failed-write scenario cannot be
            // simulated this way.
            std::fs::set_permissions(&data_dir, std::fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }
        let result = perform_restore(&ctx, "wblog_20240101000000.db").await;
        std::fs::set_permissions(&data_dir, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(RestoreError::WriteFailure(_))));
        assert_eq!(std::fs::read(&data_path).unwrap(), b"previous generation");
    }
}
