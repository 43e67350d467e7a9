use camino::Utf8PathBuf;
use serde::Serialize;

/// Per-run overrides for the backup executor. Any `None` field falls back
/// to the current configuration value.
#[derive(Debug, Clone, Default)]
pub struct BackupRequest {
    pub source: Option<Utf8PathBuf>,
    pub destination: Option<Utf8PathBuf>,
    pub zip: Option<bool>,
}

/// Outcome of a single backup run. Created fresh per run and never
/// persisted; the message is suitable for direct display.
#[derive(Debug, Clone, Serialize)]
pub struct BackupResult {
    pub success: bool,
    pub message: String,
    pub backup_path: Option<Utf8PathBuf>,
    pub file_count: u64,
    pub duration_seconds: f64,
}

impl BackupResult {
    pub fn succeeded(
        message: String,
        backup_path: Utf8PathBuf,
        file_count: u64,
        duration_seconds: f64,
    ) -> Self {
        Self {
            success: true,
            message,
            backup_path: Some(backup_path),
            file_count,
            duration_seconds,
        }
    }

    /// Failure before any metrics were taken (validation and preparation
    /// errors).
    pub fn failed(message: String) -> Self {
        Self::failed_with_metrics(message, 0, 0.0)
    }

    /// Failure during the transfer step; keeps the metrics gathered up to
    /// the failure point.
    pub fn failed_with_metrics(message: String, file_count: u64, duration_seconds: f64) -> Self {
        Self {
            success: false,
            message,
            backup_path: None,
            file_count,
            duration_seconds,
        }
    }
}
