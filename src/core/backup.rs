use crate::config::AppConfig;
use crate::core::compress::Compression;
use crate::core::version::VersionResolver;
use crate::models::backup::{BackupRequest, BackupResult};
use crate::models::error::{KeeperError, KeeperResult};
use crate::utils::file::FileUtils;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use std::time::Instant;
use tracing::{error, info};

/// Runs backups: validates inputs, names the artifact after the current
/// timestamp plus an optional version suffix, and performs a plain copy or
/// a zip archive of the source tree.
///
/// Validation and execution are strictly separated: nothing on the
/// filesystem is touched until source and destination have been accepted.
pub struct BackupExecutor;

impl BackupExecutor {
    /// Runs one backup. Request values override the configuration; every
    /// failure is folded into the returned result, never propagated.
    pub fn run(config: &AppConfig, request: &BackupRequest) -> BackupResult {
        let src = request
            .source
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(config.source.clone()));
        let dst = request
            .destination
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(config.destination.clone()));
        let zip_mode = request.zip.unwrap_or(config.zip);

        if src.as_str().is_empty() || !src.is_dir() {
            let msg = format!("Source folder does not exist or is not set: '{src}'");
            error!("{msg}");
            return BackupResult::failed(msg);
        }

        if dst.as_str().is_empty() {
            let msg = "Destination folder is not set.".to_string();
            error!("{msg}");
            return BackupResult::failed(msg);
        }

        if let Err(e) = std::fs::create_dir_all(&dst) {
            let msg = format!("Cannot create destination folder '{dst}': {e}");
            error!("{msg}");
            return BackupResult::failed(msg);
        }

        // Best-effort absolute form for logs and the result message
        let src = dunce::canonicalize(src.as_std_path())
            .ok()
            .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
            .unwrap_or(src);

        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let token = VersionResolver::normalize(&VersionResolver::resolve(config, &src));
        let suffix = if token.is_empty() {
            String::new()
        } else {
            format!("_v{token}")
        };
        let base_path = dst.join(format!("backup_{timestamp}{suffix}"));

        info!("Starting backup: {src} -> {base_path} (zip={zip_mode})");

        let start = Instant::now();
        // Counted before the transfer so failed runs still report how big
        // the tree was; the tree may mutate mid-run (accepted race).
        let file_count = FileUtils::count_files(&src);

        match Self::transfer(&src, &base_path, zip_mode) {
            Ok(backup_path) => {
                let duration = start.elapsed().as_secs_f64();
                let msg = format!(
                    "Backup successful -> {backup_path} | files={file_count} | duration={duration:.2}s | zip={zip_mode}"
                );
                info!("{msg}");
                BackupResult::succeeded(msg, backup_path, file_count, duration)
            }
            Err(e) => {
                let duration = start.elapsed().as_secs_f64();
                let msg = Self::failure_message(&e);
                error!("{msg}");
                BackupResult::failed_with_metrics(msg, file_count, duration)
            }
        }
    }

    fn transfer(src: &Utf8Path, base_path: &Utf8Path, zip_mode: bool) -> KeeperResult<Utf8PathBuf> {
        if zip_mode {
            let archive_path = Utf8PathBuf::from(format!("{base_path}.zip"));
            Compression::zip_dir(src, &archive_path)?;
            Ok(archive_path)
        } else {
            // Names are timestamped to the second, so a collision means two
            // runs inside the same second; refuse instead of merging trees.
            if base_path.exists() {
                return Err(KeeperError::Io(std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    format!("backup target already exists: {base_path}"),
                )));
            }
            FileUtils::copy_recursive(src, base_path)?;
            Ok(base_path.to_owned())
        }
    }

    fn failure_message(error: &KeeperError) -> String {
        if error.is_permission_denied() {
            format!("Backup failed (permission): {error}")
        } else if matches!(error, KeeperError::Archive(_)) {
            format!("Backup failed (archive): {error}")
        } else {
            format!("Backup failed: {error}")
        }
    }
}
