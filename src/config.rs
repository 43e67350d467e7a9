use crate::models::error::{KeeperError, KeeperResult};
use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CONFIG_FILE: &str = "config.json";

/// User preferences, persisted as pretty-printed JSON at a fixed path.
/// The file is the single source of truth: it is re-read before every
/// operation and rewritten in full on every mutation.
///
/// Field-level defaults apply when a key is missing from an existing file,
/// so a hand-edited config without `zip` reads as plain-copy mode even
/// though new files are written with `zip = true`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub zip: bool,
    /// Scheduler cadence in minutes; 0 disables the scheduler.
    #[serde(default)]
    pub backup_interval_minutes: u64,
    /// "auto" or "manual"; anything unrecognized behaves as auto.
    #[serde(default = "default_version_mode")]
    pub version_mode: String,
    #[serde(default)]
    pub manual_version: String,
    /// Files scanned for a version token in auto mode, highest priority first.
    #[serde(default = "default_version_files")]
    pub preferred_version_files: Vec<String>,
}

fn default_version_mode() -> String {
    "auto".to_string()
}

fn default_version_files() -> Vec<String> {
    [
        "version.txt",
        "VERSION",
        "package.json",
        "Cargo.toml",
        "pyproject.toml",
        "setup.cfg",
        "setup.py",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: String::new(),
            destination: String::new(),
            zip: true,
            backup_interval_minutes: 0,
            version_mode: default_version_mode(),
            manual_version: String::new(),
            preferred_version_files: default_version_files(),
        }
    }
}

impl AppConfig {
    /// Reads the configuration from `path`, creating the file with defaults
    /// if it does not exist yet.
    pub fn load(path: &Utf8Path) -> KeeperResult<AppConfig> {
        if !path.exists() {
            let config = AppConfig::default();
            config.save(path)?;
            return Ok(config);
        }

        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| KeeperError::Config(format!("Cannot parse '{path}': {e}")))
    }

    /// Rewrites the whole configuration file, creating parent directories
    /// as needed.
    pub fn save(&self, path: &Utf8Path) -> KeeperResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let text = serde_json::to_string_pretty(self)
            .map_err(|e| KeeperError::Config(e.to_string()))?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Default location of the configuration file: the platform config
    /// directory, falling back to the executable's directory and finally
    /// the working directory.
    pub fn default_path() -> Utf8PathBuf {
        let base_dir = ProjectDirs::from("com", "martes", "backup-keeper")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .or_else(|| {
                std::env::current_exe()
                    .ok()
                    .and_then(|exe_path| exe_path.parent().map(|p| p.to_path_buf()))
            })
            .unwrap_or_else(|| PathBuf::from("."));

        Utf8PathBuf::from_path_buf(base_dir.join(CONFIG_FILE))
            .unwrap_or_else(|_| Utf8PathBuf::from(CONFIG_FILE))
    }
}
