//! Sandbox configuration.

use serde::{Deserialize, Serialize};

/// Default pattern recognizing an internal compiler assertion.
pub const DEFAULT_ASSERTION_PATTERN: &str = r"(?i)assertion(?: `[^`]*`)? failed";

/// Default name of the exported entry point.
pub const DEFAULT_ENTRY_POINT: &str = "main";

/// Code generation effort for loaded binaries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptLevel {
    None,
    #[default]
    Speed,
    SpeedAndSize,
}

impl From<OptLevel> for wasmtime::OptLevel {
    fn from(level: OptLevel) -> Self {
        match level {
            OptLevel::None => wasmtime::OptLevel::None,
            OptLevel::Speed => wasmtime::OptLevel::Speed,
            OptLevel::SpeedAndSize => wasmtime::OptLevel::SpeedAndSize,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Export invoked with no arguments; must return an `i32` fingerprint.
    pub entry_point: String,
    /// Regex a failure message must match to count as an assertion failure.
    pub assertion_pattern: String,
    pub opt_level: OptLevel,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            entry_point: DEFAULT_ENTRY_POINT.to_owned(),
            assertion_pattern: DEFAULT_ASSERTION_PATTERN.to_owned(),
            opt_level: OptLevel::default(),
        }
    }
}
