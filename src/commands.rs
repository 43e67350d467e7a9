use crate::config::AppConfig;
use crate::core::backup::BackupExecutor;
use crate::core::scheduler::Scheduler;
use crate::models::backup::{BackupRequest, BackupResult};
use anyhow::{bail, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use std::time::Duration;

/// Configuration fields settable from the command line. Unset fields keep
/// their stored values.
#[derive(Args, Debug, Default)]
pub struct ConfigUpdate {
    /// Source directory to back up
    #[arg(long)]
    pub source: Option<Utf8PathBuf>,

    /// Destination directory for backups
    #[arg(long)]
    pub destination: Option<Utf8PathBuf>,

    /// Archive mode: true produces a zip, false a plain copy
    #[arg(long)]
    pub zip: Option<bool>,

    /// Scheduler interval in minutes (0 disables the scheduler)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Version detection mode: auto or manual
    #[arg(long)]
    pub version_mode: Option<String>,

    /// Version string used in manual mode
    #[arg(long)]
    pub manual_version: Option<String>,

    /// Candidate version file scanned in auto mode; repeat the flag to
    /// build the list, highest priority first
    #[arg(long = "version-file")]
    pub version_files: Vec<String>,
}

/// Runs a single backup. Command-line overrides are persisted to the
/// store before the run, matching what the stored configuration would
/// produce on the next scheduled tick.
pub fn run_once(
    config_path: &Utf8Path,
    source: Option<Utf8PathBuf>,
    destination: Option<Utf8PathBuf>,
    zip: Option<bool>,
) -> Result<BackupResult> {
    let mut config = AppConfig::load(config_path)
        .with_context(|| format!("cannot load configuration at '{config_path}'"))?;

    if let Some(ref source) = source {
        config.source = source.to_string();
    }
    if let Some(ref destination) = destination {
        config.destination = destination.to_string();
    }
    if let Some(zip) = zip {
        config.zip = zip;
    }
    config.save(config_path)?;

    let request = BackupRequest {
        source,
        destination,
        zip,
    };
    Ok(BackupExecutor::run(&config, &request))
}

/// Starts the scheduler and blocks until the user presses Enter, then
/// stops it cooperatively.
pub fn watch(config_path: &Utf8Path, interval_minutes: Option<u64>) -> Result<()> {
    let mut config = AppConfig::load(config_path)
        .with_context(|| format!("cannot load configuration at '{config_path}'"))?;

    if let Some(interval) = interval_minutes {
        config.backup_interval_minutes = interval;
    }
    config.save(config_path)?;

    if config.backup_interval_minutes == 0 {
        bail!("Backup interval is 0; set a positive interval to start the scheduler");
    }

    let scheduler = Scheduler::start(
        config_path.to_owned(),
        Duration::from_secs(config.backup_interval_minutes * 60),
    );
    println!(
        "Scheduler started, backing up every {} minute(s). Press Enter to stop.",
        config.backup_interval_minutes
    );

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    scheduler.stop();
    println!("Scheduler stopped.");
    Ok(())
}

/// Prints the stored configuration, creating it with defaults first if it
/// does not exist yet.
pub fn show_config(config_path: &Utf8Path) -> Result<()> {
    let config = AppConfig::load(config_path)
        .with_context(|| format!("cannot load configuration at '{config_path}'"))?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Applies the given updates to the stored configuration and prints the
/// result.
pub fn set_config(config_path: &Utf8Path, update: ConfigUpdate) -> Result<()> {
    let mut config = AppConfig::load(config_path)
        .with_context(|| format!("cannot load configuration at '{config_path}'"))?;

    if let Some(source) = update.source {
        config.source = source.into_string();
    }
    if let Some(destination) = update.destination {
        config.destination = destination.into_string();
    }
    if let Some(zip) = update.zip {
        config.zip = zip;
    }
    if let Some(interval) = update.interval {
        config.backup_interval_minutes = interval;
    }
    if let Some(mode) = update.version_mode {
        config.version_mode = mode;
    }
    if let Some(manual) = update.manual_version {
        config.manual_version = manual;
    }
    if !update.version_files.is_empty() {
        config.preferred_version_files = update.version_files;
    }

    config.save(config_path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
