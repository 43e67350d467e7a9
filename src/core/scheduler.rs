use crate::config::AppConfig;
use crate::core::backup::BackupExecutor;
use crate::models::backup::BackupRequest;
use camino::Utf8PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{error, info};

/// Periodic backup trigger running on its own thread.
///
/// The configuration is re-read from disk before every tick, so option
/// changes are picked up without a restart; only the interval is fixed at
/// start. Cancellation is cooperative: the worker checks a stop flag
/// between sleep increments of at most one second and never interrupts an
/// in-flight transfer. A failed or skipped run is logged and the loop
/// continues with the next tick.
pub struct Scheduler {
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// Spawns the worker. The first backup runs immediately, then every
    /// `interval`.
    pub fn start(config_path: Utf8PathBuf, interval: Duration) -> Scheduler {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let worker = thread::spawn(move || Self::run_loop(config_path, interval, flag));

        Scheduler {
            stop,
            worker: Some(worker),
        }
    }

    /// Signals the worker to stop without waiting for it.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Signals the worker to stop and waits for it to finish. The wait
    /// covers at most one in-flight transfer plus one sleep increment.
    pub fn stop(mut self) {
        self.request_stop();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }

    fn run_loop(config_path: Utf8PathBuf, interval: Duration, stop: Arc<AtomicBool>) {
        info!("Scheduler started (interval {interval:?})");

        while !stop.load(Ordering::Relaxed) {
            match AppConfig::load(&config_path) {
                Ok(config) => {
                    let result = BackupExecutor::run(&config, &BackupRequest::default());
                    if !result.success {
                        error!("Scheduled backup failed: {}", result.message);
                    }
                }
                Err(e) => error!("Scheduled backup skipped, cannot load configuration: {e}"),
            }

            let mut remaining = interval;
            while remaining > Duration::ZERO && !stop.load(Ordering::Relaxed) {
                let step = remaining.min(Duration::from_secs(1));
                thread::sleep(step);
                remaining -= step;
            }
        }

        info!("Scheduler stopped");
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.request_stop();
    }
}
