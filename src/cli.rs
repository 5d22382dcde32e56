//! Command-line interface for the worker.

use std::time::Duration;

use clap::Parser;
use reducto::config::{DEFAULT_RECYCLE_THRESHOLD, WorkerConfig};

#[derive(Debug, Parser)]
#[command(name = "reducto-worker")]
#[command(about = "Runs Debug/Release wasm builds on behalf of a fuzzing supervisor", long_about = None)]
pub struct Cli {
    /// Process id of the supervisor; the worker exits when it disappears
    #[arg(value_name = "PARENT_PID", value_parser = clap::value_parser!(u32).range(1..))]
    pub parent: u32,

    /// Requests served by one execution container before it is replaced
    #[arg(long, env = "REDUCTO_RECYCLE_THRESHOLD", default_value_t = DEFAULT_RECYCLE_THRESHOLD)]
    pub recycle_threshold: usize,

    /// Seconds between checks on the supervisor
    #[arg(
        long,
        env = "REDUCTO_WATCHDOG_INTERVAL_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub watchdog_interval_secs: u64,

    /// Log filter directive, written to stderr
    #[arg(long, env = "REDUCTO_LOG", default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    pub fn config(&self) -> WorkerConfig {
        WorkerConfig {
            recycle_threshold: self.recycle_threshold,
            watchdog_interval: Duration::from_secs(self.watchdog_interval_secs),
            ..WorkerConfig::default()
        }
    }
}
