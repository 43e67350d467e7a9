use anyhow::{Context, Result};
use backup_keeper_lib::commands::{self, ConfigUpdate};
use backup_keeper_lib::config::AppConfig;
use backup_keeper_lib::logging;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "backup_keeper",
    version,
    about = "Copies or zips a folder to a destination, tagging each backup \
             with a timestamp and an auto-detected version"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, env = "BACKUP_KEEPER_CONFIG")]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single backup now
    Run {
        /// Override the configured source directory
        #[arg(short, long)]
        source: Option<Utf8PathBuf>,

        /// Override the configured destination directory
        #[arg(short, long)]
        destination: Option<Utf8PathBuf>,

        /// Override archive mode: true produces a zip, false a plain copy
        #[arg(long)]
        zip: Option<bool>,
    },

    /// Run backups on a timer until Enter is pressed
    Watch {
        /// Interval in minutes; overrides and persists the stored value
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Inspect or update the stored configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the current configuration
    Show,
    /// Update configuration values
    Set(ConfigUpdate),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);

    let log_dir = config_path
        .parent()
        .map(|p| p.to_owned())
        .unwrap_or_else(|| Utf8PathBuf::from("."));
    let _guard = logging::init(&log_dir).context("failed to initialize logging")?;

    match cli.command {
        Commands::Run {
            source,
            destination,
            zip,
        } => {
            let result = commands::run_once(&config_path, source, destination, zip)?;
            println!("{}", result.message);
            if !result.success {
                std::process::exit(1);
            }
        }
        Commands::Watch { interval } => commands::watch(&config_path, interval)?,
        Commands::Config(ConfigCommands::Show) => commands::show_config(&config_path)?,
        Commands::Config(ConfigCommands::Set(update)) => {
            commands::set_config(&config_path, update)?
        }
    }

    Ok(())
}
