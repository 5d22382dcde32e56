//! Diagnostic logging.
//!
//! Stdout carries the protocol, so every event goes to stderr.

use std::error::Error;

use tracing_subscriber::EnvFilter;

/// Install the global subscriber with the given filter directive
/// (`warn`, `reducto=debug,wasmtime=info`, ...).
pub fn init(filter: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = EnvFilter::try_new(filter)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init()?;
    tracing::debug!("tracing initialized");
    Ok(())
}
