//! wblog backup tool
//!
//! Encrypted backup/restore for the wblog single-file datastore, plus the
//! in-process scheduler that runs the weekly backup and the daily sitemap
//! regeneration.

// wblogtool/src/main.rs
mod backup;
mod config;
mod context;
mod crypto;
mod errors;
mod restore;
mod scheduler;
mod sitemap;
mod storage;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use config::AppConfig;
use context::AppContext;
use scheduler::Scheduler;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use storage::s3::S3ArtifactStore;
use tokio::sync::mpsc;

const SITEMAP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);
const BACKUP_INTERVAL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Main entry point for the backup/restore tool
#[tokio::main]
async fn main() -> ExitCode {
    match run_app().await {
        Ok(_) => {
            println!("✅ Operation completed successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_app() -> Result<()> {
    // Expects config.json next to the executable, or in the project root
    // when running with `cargo run`.
    let config_path = PathBuf::from("config.json");
    let app_config = AppConfig::load_from_json(&config_path).context(format!(
        "Failed to load application configuration from {}",
        config_path.display()
    ))?;

    let store = S3ArtifactStore::connect(&app_config.object_store)
        .await
        .context("Failed to set up object store client")?;
    let ctx = AppContext::new(app_config, Arc::new(store));

    let args: Vec<String> = env::args().collect();
    let choice = if args.len() > 1 {
        args[1].trim().to_string()
    } else {
        prompt_choice()?
    };

    match choice.as_str() {
        "1" | "backup" => {
            println!("🚀 Starting backup...");
            let name = backup::run_backup_flow(&ctx)
                .await
                .context("Backup process failed")?;
            println!("Snapshot stored as {}", name);
        }
        "2" | "restore" => {
            let artifact_name = match args.get(2) {
                Some(name) => name.trim().to_string(),
                None => prompt_artifact_name()?,
            };
            println!("🔄 Restoring snapshot {}...", artifact_name);
            restore::run_restore_flow(&ctx, &artifact_name)
                .await
                .context("Restore process failed")?;
        }
        "3" | "schedule" => {
            run_scheduler(ctx).await?;
        }
        _ => {
            println!("❌ Invalid choice. Please enter '1' (backup), '2' (restore), or '3' (schedule).");
            anyhow::bail!("Invalid operation choice");
        }
    }
    Ok(())
}

/// Registers the daily sitemap job and the weekly backup job, then runs the
/// scheduler until Ctrl-C.
async fn run_scheduler(ctx: AppContext) -> Result<()> {
    let mut scheduler = Scheduler::new();

    let sitemap_ctx = ctx.clone();
    scheduler.every(SITEMAP_INTERVAL, "sitemap", move || -> scheduler::JobFuture {
        let ctx = sitemap_ctx.clone();
        Box::pin(async move { sitemap::write_sitemap(&ctx.config) })
    });

    let backup_ctx = ctx.clone();
    scheduler.every(BACKUP_INTERVAL, "backup", move || -> scheduler::JobFuture {
        let ctx = backup_ctx.clone();
        Box::pin(async move {
            backup::run_backup_flow(&ctx)
                .await
                .map(|_| ())
                .map_err(anyhow::Error::from)
        })
    });

    let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(()).await;
        }
    });

    scheduler.run(shutdown_rx).await;
    Ok(())
}

/// Prompts user to select an operation
///
/// Returns the user's choice as String
fn prompt_choice() -> Result<String> {
    use std::io::{stdin, stdout, Write};

    println!("Select an operation:");
    println!("1. Run backup now (or type 'backup')");
    println!("2. Restore a snapshot (or type 'restore <artifactName>')");
    println!("3. Run the scheduler (or type 'schedule')");
    print!("Enter your choice: ");
    let _ = stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    stdin()
        .read_line(&mut input)
        .context("Failed to read user input")?;
    Ok(input.trim().to_string())
}

fn prompt_artifact_name() -> Result<String> {
    use std::io::{stdin, stdout, Write};

    print!("Enter the artifact name to restore (e.g. wblog_20240309170542.db): ");
    let _ = stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    stdin()
        .read_line(&mut input)
        .context("Failed to read user input")?;
    Ok(input.trim().to_string())
}
