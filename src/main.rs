//! Fuzzing worker entry point.

mod cli;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use cli::Cli;
use reducto::Worker;
use reducto::lifecycle::{ProcessTable, Watchdog, exit_orphaned};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = reducto::logging::init(&cli.log_level) {
        eprintln!("Invalid log filter: {e}");
        return ExitCode::from(2);
    }

    let config = cli.config();
    let _watchdog = match Watchdog::spawn(
        cli.parent,
        config.watchdog_interval,
        ProcessTable,
        exit_orphaned,
    ) {
        Ok(watchdog) => watchdog,
        Err(e) => {
            eprintln!("Failed to start watchdog: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut worker = match Worker::new(&config) {
        Ok(worker) => worker,
        Err(e) => {
            eprintln!("Failed to create execution container: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(parent = cli.parent, container = %worker.container_id(), "worker ready");

    match worker.serve(io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "request loop failed");
            eprintln!("I/O error: {e}");
            ExitCode::FAILURE
        }
    }
}
