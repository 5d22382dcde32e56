//! Worker process for differential compiler fuzzing.
//!
//! The worker reads run requests from stdin, executes the Debug and
//! Release builds of each candidate in a shared [`ExecutionContainer`],
//! and answers on stdout. A watchdog thread terminates the worker when
//! its controlling process goes away, and the container is replaced after
//! a configurable number of requests.
//!
//! Tree reduction lives in `reducto-reduce`; execution and classification
//! in `reducto-sandbox`.
//!
//! [`ExecutionContainer`]: reducto_sandbox::ExecutionContainer

pub mod config;
pub mod ipc;
pub mod lifecycle;
pub mod logging;

pub use config::WorkerConfig;
pub use ipc::{RunRequest, RunResponse, SENTINEL, Worker};
