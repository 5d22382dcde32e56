//! Run outcomes and failure classification.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::capture::{Fault, FaultKind};
use crate::error::{LoadError, SandboxError};

/// How one run of one binary ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The entry point returned normally.
    Success { fingerprint: i32 },
    /// Decided by an external wall-clock supervisor, never by the harness.
    Timeout,
    /// The compiler under test hit one of its own assertions.
    AssertionFailure { message: String },
    /// Decided by comparing two successful runs, never by the harness.
    OutputMismatch { debug: i32, release: i32 },
    OtherError { message: String },
    /// The binary could not be loaded or its entry point resolved.
    CompilationError { message: String },
}

impl RunOutcome {
    pub fn fingerprint(&self) -> Option<i32> {
        match self {
            RunOutcome::Success { fingerprint } => Some(*fingerprint),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RunOutcome::AssertionFailure { message }
            | RunOutcome::OtherError { message }
            | RunOutcome::CompilationError { message } => Some(message),
            RunOutcome::Success { .. } | RunOutcome::Timeout | RunOutcome::OutputMismatch { .. } => {
                None
            }
        }
    }

    pub fn is_assertion(&self) -> bool {
        matches!(self, RunOutcome::AssertionFailure { .. })
    }
}

/// Recognizes internal-compiler-assertion messages.
#[derive(Clone, Debug)]
pub struct AssertionMatcher {
    pattern: Regex,
}

impl AssertionMatcher {
    pub fn new(pattern: &str) -> Result<Self, SandboxError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn is_match(&self, message: &str) -> bool {
        self.pattern.is_match(message)
    }
}

/// Classify a failed run from the faults it raised, oldest first.
///
/// The first fault is the root cause; later ones were raised while
/// unwinding and are ignored. An initialization fault is unwrapped to the
/// fault that caused it.
pub fn classify(faults: &[Fault], matcher: &AssertionMatcher) -> RunOutcome {
    let Some(root) = faults.first() else {
        return RunOutcome::OtherError {
            message: "run failed without raising a fault".to_owned(),
        };
    };
    let cause = match (&root.kind, &root.inner) {
        (FaultKind::Initialization, Some(inner)) => inner,
        _ => root,
    };

    let message = cause.message.clone();
    if matcher.is_match(&message) {
        RunOutcome::AssertionFailure { message }
    } else {
        RunOutcome::OtherError { message }
    }
}

/// Classify a binary that never got to run.
pub fn classify_load_error(error: &LoadError, matcher: &AssertionMatcher) -> RunOutcome {
    match error.panic_message() {
        Some(message) if matcher.is_match(message) => RunOutcome::AssertionFailure {
            message: message.to_owned(),
        },
        _ => RunOutcome::CompilationError {
            message: error.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ASSERTION_PATTERN;

    fn matcher() -> AssertionMatcher {
        AssertionMatcher::new(DEFAULT_ASSERTION_PATTERN).unwrap()
    }

    #[test]
    fn test_default_pattern() {
        let matcher = matcher();
        assert!(matcher.is_match("assertion failed: idx < len"));
        assert!(matcher.is_match("Assertion `ty.is_int()` failed"));
        assert!(matcher.is_match("ASSERTION FAILED"));
        assert!(!matcher.is_match("index out of bounds"));
        assert!(!matcher.is_match("assertion passed"));
    }

    #[test]
    fn test_root_cause_wins() {
        let faults = vec![
            Fault::new(FaultKind::Exception, "division by zero"),
            Fault::new(FaultKind::Panic, "assertion failed: cleanup"),
        ];
        assert_eq!(
            classify(&faults, &matcher()),
            RunOutcome::OtherError {
                message: "division by zero".to_owned()
            }
        );
    }

    #[test]
    fn test_initialization_is_unwrapped() {
        let wrapped = Fault::initialization(Fault::new(FaultKind::Exception, "plain error"));
        let faults = vec![wrapped, Fault::new(FaultKind::Error, "backtrace noise")];
        assert_eq!(
            classify(&faults, &matcher()),
            RunOutcome::OtherError {
                message: "plain error".to_owned()
            }
        );

        let asserting = Fault::initialization(Fault::new(
            FaultKind::Panic,
            "assertion failed: regalloc",
        ));
        assert!(classify(&[asserting], &matcher()).is_assertion());
    }

    #[test]
    fn test_bare_initialization_uses_own_message() {
        let fault = Fault::new(FaultKind::Initialization, "start failed");
        assert_eq!(
            classify(&[fault], &matcher()).error_message(),
            Some("start failed")
        );
    }

    #[test]
    fn test_compiler_panics_during_load() {
        let matcher = matcher();

        let asserted = LoadError::compiler_panic(
            "assertion failed: `(left == right)` in regalloc".to_owned(),
        );
        assert_eq!(
            classify_load_error(&asserted, &matcher),
            RunOutcome::AssertionFailure {
                message: "assertion failed: `(left == right)` in regalloc".to_owned()
            }
        );

        let crashed = LoadError::compiler_panic("index out of bounds: the len is 3".to_owned());
        assert_eq!(
            classify_load_error(&crashed, &matcher),
            RunOutcome::CompilationError {
                message: "Compiler panicked: index out of bounds: the len is 3".to_owned()
            }
        );

        let missing = LoadError::missing_entry_point("main");
        assert_eq!(
            classify_load_error(&missing, &matcher),
            RunOutcome::CompilationError {
                message: "Entry point not found: main".to_owned()
            }
        );
    }

    #[test]
    fn test_no_faults() {
        assert!(matches!(
            classify(&[], &matcher()),
            RunOutcome::OtherError { .. }
        ));
    }

    #[test]
    fn test_accessors() {
        let success = RunOutcome::Success { fingerprint: 7 };
        assert_eq!(success.fingerprint(), Some(7));
        assert_eq!(success.error_message(), None);
        assert!(!success.is_assertion());

        let mismatch = RunOutcome::OutputMismatch {
            debug: 1,
            release: 2,
        };
        assert_eq!(mismatch.fingerprint(), None);
        assert_eq!(mismatch.error_message(), None);
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = RunOutcome::AssertionFailure {
            message: "assertion failed".to_owned(),
        };
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"outcome":"assertion_failure","message":"assertion failed"}"#
        );
    }
}
