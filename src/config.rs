//! Worker configuration.

use std::time::Duration;

use reducto_sandbox::SandboxConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RECYCLE_THRESHOLD: usize = 100;
pub const DEFAULT_WATCHDOG_INTERVAL: Duration = Duration::from_secs(10);

/// Environment variables whose names start with one of these are reported
/// back with every response.
pub const DEFAULT_ENV_PREFIXES: [&str; 3] = ["WASMTIME_", "CRANELIFT_", "RUST_"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Requests served by one container before it is replaced.
    pub recycle_threshold: usize,
    /// How often the watchdog checks on the parent process.
    pub watchdog_interval: Duration,
    pub sandbox: SandboxConfig,
    pub env_prefixes: Vec<String>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            recycle_threshold: DEFAULT_RECYCLE_THRESHOLD,
            watchdog_interval: DEFAULT_WATCHDOG_INTERVAL,
            sandbox: SandboxConfig::default(),
            env_prefixes: DEFAULT_ENV_PREFIXES.map(str::to_owned).to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: WorkerConfig =
            serde_json::from_str(r#"{"recycle_threshold": 5, "sandbox": {"entry_point": "run"}}"#)
                .unwrap();

        assert_eq!(config.recycle_threshold, 5);
        assert_eq!(config.watchdog_interval, DEFAULT_WATCHDOG_INTERVAL);
        assert_eq!(config.sandbox.entry_point, "run");
        assert_eq!(
            config.sandbox.assertion_pattern,
            reducto_sandbox::DEFAULT_ASSERTION_PATTERN
        );
        assert_eq!(config.env_prefixes, vec!["WASMTIME_", "CRANELIFT_", "RUST_"]);
    }
}
