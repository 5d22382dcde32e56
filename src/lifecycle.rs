//! Process lifecycle: the parent watchdog and container recycling.

use std::io::{self, Write};
use std::mem;
use std::process;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use reducto_sandbox::{ContainerId, ExecutionContainer, SandboxConfig, SandboxError};

/// Exit status used when the controlling process disappears.
pub const EXIT_ORPHANED: i32 = 3;

/// Answers whether a process still exists.
pub trait ParentProbe: Send + 'static {
    fn is_alive(&self, pid: u32) -> bool;
}

/// Probes the operating system's process table.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessTable;

impl ParentProbe for ProcessTable {
    fn is_alive(&self, pid: u32) -> bool {
        let Ok(pid) = libc::pid_t::try_from(pid) else {
            return false;
        };
        // SAFETY: signal 0 only checks that the process exists and may be signalled.
        if unsafe { libc::kill(pid, 0) } == 0 {
            return true;
        }
        // The process exists but belongs to someone else.
        io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
    }
}

/// Dead-man switch on the controlling process.
///
/// The check runs on its own thread and shares nothing with the request
/// loop. When the parent is gone the orphan action runs, pre-empting
/// whatever the main thread is doing.
pub struct Watchdog {
    handle: JoinHandle<()>,
}

impl Watchdog {
    pub fn spawn<P, F>(parent: u32, interval: Duration, probe: P, on_orphan: F) -> io::Result<Self>
    where
        P: ParentProbe,
        F: FnOnce(u32) + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name("reducto-watchdog".to_owned())
            .spawn(move || {
                tracing::debug!(parent, ?interval, "watchdog started");
                while probe.is_alive(parent) {
                    thread::sleep(interval);
                }
                on_orphan(parent);
            })?;
        Ok(Self { handle })
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the watchdog thread. Only returns once the parent is gone
    /// and the orphan action has returned.
    pub fn join(self) -> thread::Result<()> {
        self.handle.join()
    }
}

/// The production orphan action: report and terminate immediately.
pub fn exit_orphaned(parent: u32) {
    tracing::error!(parent, "controlling process is gone");
    let _ = writeln!(
        io::stderr(),
        "reducto-worker: parent process {parent} exited, terminating"
    );
    process::exit(EXIT_ORPHANED);
}

/// Swaps the active execution container after a fixed number of requests.
///
/// Loaded code cannot be released individually, so the whole container is
/// retired instead. A retired container stays alive until [`reclaim`] is
/// called.
///
/// [`reclaim`]: Recycler::reclaim
#[derive(Debug)]
pub struct Recycler {
    config: SandboxConfig,
    active: ExecutionContainer,
    retired: Option<ExecutionContainer>,
    served: usize,
    threshold: usize,
}

impl Recycler {
    pub fn new(config: SandboxConfig, threshold: usize) -> Result<Self, SandboxError> {
        let active = ExecutionContainer::create(&config)?;
        Ok(Self {
            config,
            active,
            retired: None,
            served: 0,
            threshold,
        })
    }

    pub fn active(&mut self) -> &mut ExecutionContainer {
        &mut self.active
    }

    pub fn active_id(&self) -> ContainerId {
        self.active.id()
    }

    /// Requests served since the active container was created.
    pub fn served(&self) -> usize {
        self.served
    }

    pub fn has_retired(&self) -> bool {
        self.retired.is_some()
    }

    /// Count one processed request, replacing the active container once
    /// the count exceeds the threshold. Returns whether it was replaced.
    ///
    /// If a fresh container cannot be created the active one stays in
    /// service and the count is kept, so the next request retries.
    pub fn record_request(&mut self) -> Result<bool, SandboxError> {
        self.served += 1;
        if self.served <= self.threshold {
            return Ok(false);
        }

        let fresh = ExecutionContainer::create(&self.config)?;
        let old = mem::replace(&mut self.active, fresh);
        tracing::info!(
            retired = %old.id(),
            active = %self.active.id(),
            served = self.served,
            "recycled execution container"
        );
        self.retired = Some(old);
        self.served = 0;
        Ok(true)
    }

    /// Drop the retired container, if any.
    pub fn reclaim(&mut self) {
        if let Some(old) = self.retired.take() {
            tracing::debug!(container = %old.id(), "reclaiming retired container");
        }
    }
}
