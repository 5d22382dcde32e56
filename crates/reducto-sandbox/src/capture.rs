//! Thread-scoped fault capture.
//!
//! Panics are reported process-wide through the panic hook. A
//! [`CaptureScope`] registers the current thread so that panics raised on it
//! are recorded, in the order they are raised, instead of being printed.
//! Panics on any other thread fall through to the previously installed hook.

use std::collections::HashMap;
use std::error::Error as StdError;
use std::marker::PhantomData;
use std::panic::{self, PanicHookInfo};
use std::sync::{LazyLock, Mutex, MutexGuard, Once, PoisonError};
use std::thread::{self, ThreadId};

use derive_more::Display;

use crate::container::GuestException;

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum FaultKind {
    /// A Rust panic, typically from the compiler.
    #[display("panic")]
    Panic,
    /// A wasm trap: `unreachable`, out-of-bounds access, stack overflow.
    #[display("trap")]
    Trap,
    /// A guest-raised exception through `env.throw`.
    #[display("exception")]
    Exception,
    /// Module instantiation failed; the cause is in `inner`.
    #[display("initialization")]
    Initialization,
    /// Any other host-side error.
    #[display("error")]
    Error,
}

/// One failure observed during a run.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
#[display("{kind}: {message}")]
pub struct Fault {
    pub kind: FaultKind,
    pub message: String,
    pub inner: Option<Box<Fault>>,
}

impl Fault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            inner: None,
        }
    }

    /// Wrap `cause` as the reason a module could not be initialized.
    pub fn initialization(cause: Fault) -> Self {
        Self {
            kind: FaultKind::Initialization,
            message: "module initialization failed".to_owned(),
            inner: Some(Box::new(cause)),
        }
    }

    fn from_error(error: &(dyn StdError + 'static)) -> Self {
        if let Some(exception) = error.downcast_ref::<GuestException>() {
            Fault::new(FaultKind::Exception, exception.message.clone())
        } else if let Some(trap) = error.downcast_ref::<wasmtime::Trap>() {
            Fault::new(FaultKind::Trap, trap.to_string())
        } else {
            Fault::new(FaultKind::Error, error.to_string())
        }
    }

    /// Every error in `error`'s chain, innermost cause first.
    pub fn chain(error: &anyhow::Error) -> Vec<Fault> {
        error.chain().rev().map(Fault::from_error).collect()
    }
}

/// Extract the message carried by a panic payload.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}

static INSTALL_HOOK: Once = Once::new();

/// Faults recorded per capturing thread.
static CAPTURING: LazyLock<Mutex<HashMap<ThreadId, Vec<Fault>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn capturing() -> MutexGuard<'static, HashMap<ThreadId, Vec<Fault>>> {
    // The hook runs while panicking, so the lock may be poisoned.
    CAPTURING.lock().unwrap_or_else(PoisonError::into_inner)
}

fn install_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info: &PanicHookInfo<'_>| {
            if !record(info) {
                previous(info);
            }
        }));
    });
}

/// Record the panic if the current thread is capturing.
fn record(info: &PanicHookInfo<'_>) -> bool {
    let mut capturing = capturing();
    let Some(faults) = capturing.get_mut(&thread::current().id()) else {
        return false;
    };
    let mut message = panic_message(info.payload());
    if let Some(location) = info.location() {
        message = format!("{message} (at {location})");
    }
    faults.push(Fault::new(FaultKind::Panic, message));
    true
}

/// Registration of the current thread for fault capture.
///
/// Deregisters on drop, on every exit path. Scopes do not nest: entering a
/// second scope on the same thread restarts the first one's list.
#[must_use]
pub struct CaptureScope {
    thread: ThreadId,
    // Must be dropped on the thread that entered it.
    _not_send: PhantomData<*const ()>,
}

impl CaptureScope {
    pub fn enter() -> Self {
        install_hook();
        let thread = thread::current().id();
        capturing().insert(thread, Vec::new());
        Self {
            thread,
            _not_send: PhantomData,
        }
    }

    /// Faults recorded so far, oldest first.
    pub fn faults(&self) -> Vec<Fault> {
        capturing().get(&self.thread).cloned().unwrap_or_default()
    }

    /// Leave the scope, returning everything it recorded.
    pub fn finish(self) -> Vec<Fault> {
        capturing().remove(&self.thread).unwrap_or_default()
    }
}

impl Drop for CaptureScope {
    fn drop(&mut self) {
        capturing().remove(&self.thread);
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use super::*;

    #[test]
    fn test_records_panics_in_order() {
        let scope = CaptureScope::enter();
        let _ = catch_unwind(|| panic!("first"));
        let _ = catch_unwind(AssertUnwindSafe(|| {
            let _ = catch_unwind(|| panic!("inner"));
            panic!("outer");
        }));
        let faults = scope.finish();

        let messages: Vec<_> = faults
            .iter()
            .map(|fault| fault.message.split(" (at ").next().unwrap_or_default())
            .collect();
        assert_eq!(messages, vec!["first", "inner", "outer"]);
        assert!(faults.iter().all(|fault| fault.kind == FaultKind::Panic));
    }

    #[test]
    fn test_ignores_other_threads() {
        let scope = CaptureScope::enter();
        let joined = thread::spawn(|| panic!("background")).join();
        assert!(joined.is_err());
        assert!(scope.faults().is_empty());
    }

    #[test]
    fn test_scope_deregisters_on_drop() {
        {
            let _scope = CaptureScope::enter();
            let _ = catch_unwind(|| panic!("inside"));
        }
        assert!(!capturing().contains_key(&thread::current().id()));
    }

    #[test]
    fn test_error_chain_is_innermost_first() {
        let error = anyhow::Error::new(GuestException::new("root"))
            .context("while calling main")
            .context("run failed");
        let faults = Fault::chain(&error);

        assert_eq!(faults.len(), 3);
        assert_eq!(faults[0], Fault::new(FaultKind::Exception, "root"));
        assert_eq!(faults[2].message, "run failed");
    }
}
