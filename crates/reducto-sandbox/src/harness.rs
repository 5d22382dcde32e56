use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::capture::{CaptureScope, Fault, FaultKind, panic_message};
use crate::config::SandboxConfig;
use crate::container::{EntryPoint, ExecutionContainer};
use crate::error::SandboxError;
use crate::outcome::{AssertionMatcher, RunOutcome, classify, classify_load_error};

/// Runs loaded entry points and classifies how they ended.
#[derive(Clone, Debug)]
pub struct Harness {
    matcher: AssertionMatcher,
}

impl Harness {
    pub fn new(config: &SandboxConfig) -> Result<Self, SandboxError> {
        Ok(Self::with_matcher(AssertionMatcher::new(
            &config.assertion_pattern,
        )?))
    }

    pub fn with_matcher(matcher: AssertionMatcher) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &AssertionMatcher {
        &self.matcher
    }

    /// Invoke `entry` on the calling thread.
    ///
    /// Panics raised on this thread while the entry point runs are captured
    /// in the order they are raised, followed by the error chain the call
    /// returned. The first captured fault decides the classification.
    pub fn run(&self, container: &mut ExecutionContainer, entry: &EntryPoint) -> RunOutcome {
        let scope = CaptureScope::enter();
        let result = catch_unwind(AssertUnwindSafe(|| container.invoke(entry)));
        let mut faults = scope.finish();

        let outcome = match result {
            Ok(Ok(fingerprint)) => RunOutcome::Success { fingerprint },
            Ok(Err(chain)) => {
                faults.extend(chain);
                classify(&faults, &self.matcher)
            }
            Err(payload) => {
                if faults.is_empty() {
                    faults.push(Fault::new(FaultKind::Panic, panic_message(&*payload)));
                }
                classify(&faults, &self.matcher)
            }
        };
        tracing::debug!(
            container = %container.id(),
            entry = entry.name(),
            faults = faults.len(),
            ?outcome,
            "run finished"
        );
        outcome
    }

    /// Load `bytes` into `container` and run it.
    pub fn run_binary(&self, container: &mut ExecutionContainer, bytes: &[u8]) -> RunOutcome {
        match container.load(bytes) {
            Ok(entry) => self.run(container, &entry),
            Err(error) => {
                tracing::debug!(container = %container.id(), %error, "binary failed to load");
                classify_load_error(&error, &self.matcher)
            }
        }
    }
}
