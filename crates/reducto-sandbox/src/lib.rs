//! Isolated execution of compiled candidate programs.
//!
//! Binaries are WebAssembly modules exporting `main: [] -> [i32]`. They may
//! import two host functions from `env`:
//!
//! - `throw(ptr: i32, len: i32)` raises an exception carrying the UTF-8
//!   message at `memory[ptr..ptr + len]`;
//! - `log(ptr: i32, len: i32)` forwards a diagnostic string to `tracing`.
//!
//! An [`ExecutionContainer`] owns everything loaded into it and is the unit
//! of reclamation. The [`Harness`] runs entry points and classifies each run
//! into a [`RunOutcome`].

mod capture;
mod config;
mod container;
mod error;
mod harness;
mod outcome;

pub use capture::{CaptureScope, Fault, FaultKind, panic_message};
pub use config::{DEFAULT_ASSERTION_PATTERN, DEFAULT_ENTRY_POINT, OptLevel, SandboxConfig};
pub use container::{ContainerId, EntryPoint, ExecutionContainer, GuestException};
pub use error::{LoadError, LoadErrorKind, SandboxError, SandboxErrorKind};
pub use harness::Harness;
pub use outcome::{AssertionMatcher, RunOutcome, classify, classify_load_error};
