//! Periodic snapshots of the SQLite database.
//!
//! Snapshots are taken with `VACUUM INTO`, which produces a consistent copy
//! while the server keeps serving requests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use diesel::RunQueryDsl;
use tracing::{debug, error, info, instrument};

use crate::config::Config;
use crate::db::DbPool;

const BACKUP_PREFIX: &str = "lostfound-";
const BACKUP_EXTENSION: &str = "db";

/// Picks a file name for a new backup that does not clash with an existing one
fn next_backup_path(backup_dir: &Path) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%6f");
    let mut path = backup_dir.join(format!("{BACKUP_PREFIX}{stamp}.{BACKUP_EXTENSION}"));
    let mut suffix = 1;
    while path.exists() {
        path = backup_dir.join(format!("{BACKUP_PREFIX}{stamp}_{suffix}.{BACKUP_EXTENSION}"));
        suffix += 1;
    }
    path
}

/// Lists existing backups in `backup_dir`, oldest first
pub fn list_backups(backup_dir: &Path) -> Result<Vec<PathBuf>> {
    if !backup_dir.exists() {
        return Ok(Vec::new());
    }

    let mut backups: Vec<PathBuf> = fs::read_dir(backup_dir)
        .with_context(|| format!("Failed to read backup directory {}", backup_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == BACKUP_EXTENSION)
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(BACKUP_PREFIX))
        })
        .collect();

    // timestamps in the names sort chronologically
    backups.sort();
    Ok(backups)
}

/// Writes a snapshot of the database into `backup_dir` and prunes old snapshots
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `backup_dir` - Directory the snapshot is written to; created if missing
/// * `keep` - How many snapshots to keep, including the new one; at least one is always kept
///
/// ### Returns
///
/// The path of the new snapshot
#[instrument(skip(pool))]
pub fn backup_database(pool: &DbPool, backup_dir: &Path, keep: usize) -> Result<PathBuf> {
    fs::create_dir_all(backup_dir)
        .with_context(|| format!("Failed to create backup directory {}", backup_dir.display()))?;

    let path = next_backup_path(backup_dir);
    let target = path.to_string_lossy().replace('\'', "''");

    let mut conn = pool.get()?;
    diesel::sql_query(format!("VACUUM INTO '{}'", target))
        .execute(&mut conn)
        .with_context(|| format!("Failed to write backup to {}", path.display()))?;
    drop(conn);

    info!("Wrote database backup to {}", path.display());

    let backups = list_backups(backup_dir)?;
    // the snapshot just written is always kept
    let excess = backups.len().saturating_sub(keep.max(1));
    for old in &backups[..excess] {
        debug!("Removing old backup {}", old.display());
        fs::remove_file(old)
            .with_context(|| format!("Failed to remove old backup {}", old.display()))?;
    }

    Ok(path)
}

/// Takes a backup every `config.backup_interval()` until the task is dropped
///
/// Does nothing when backups are disabled. A failed backup is logged and the
/// loop carries on.
pub async fn run_periodic_backups(pool: Arc<DbPool>, config: Config) {
    if !config.backups_enabled() {
        info!("Periodic backups disabled");
        return;
    }

    let mut interval = tokio::time::interval(config.backup_interval());
    // the first tick fires immediately; skip it so startup does not write a backup
    interval.tick().await;

    loop {
        interval.tick().await;

        let pool = pool.clone();
        let backup_dir = config.backup_dir.clone();
        let keep = config.backup_count as usize;
        let result = tokio::task::spawn_blocking(move || backup_database(&pool, &backup_dir, keep)).await;

        match result {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => error!("Periodic backup failed: {:#}", e),
            Err(e) => error!("Periodic backup task panicked: {}", e),
        }
    }
}
