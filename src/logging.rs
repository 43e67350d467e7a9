use crate::models::error::{KeeperError, KeeperResult};
use camino::Utf8Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE: &str = "backup.log";

/// Installs the process-wide subscriber: an interactive stderr stream plus
/// an append-only `backup.log` in `log_dir`. Defaults to `info`,
/// overridable via `RUST_LOG`. The returned guard must stay alive for the
/// life of the process so buffered records reach the file.
pub fn init(log_dir: &Utf8Path) -> KeeperResult<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, LOG_FILE));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .try_init()
        .map_err(|e| KeeperError::Logging(e.to_string()))?;

    info!("Logger initialized");
    Ok(guard)
}
