use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::time::Duration;

use reducto::lifecycle::{EXIT_ORPHANED, ParentProbe, ProcessTable, Watchdog};

/// Reports the parent alive for a fixed number of checks.
struct Countdown {
    remaining: Arc<AtomicUsize>,
}

impl ParentProbe for Countdown {
    fn is_alive(&self, _pid: u32) -> bool {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[test]
fn test_watchdog_fires_once_parent_is_gone() {
    let remaining = Arc::new(AtomicUsize::new(3));
    let (tx, rx) = mpsc::channel();

    let watchdog = Watchdog::spawn(
        4242,
        Duration::from_millis(5),
        Countdown {
            remaining: remaining.clone(),
        },
        move |parent| tx.send(parent).expect("send"),
    )
    .expect("spawn watchdog");

    let parent = rx
        .recv_timeout(Duration::from_secs(10))
        .expect("orphan action ran");
    assert_eq!(parent, 4242);
    assert_eq!(remaining.load(Ordering::SeqCst), 0);
    watchdog.join().expect("watchdog thread");
}

#[test]
fn test_watchdog_stays_quiet_while_parent_lives() {
    let (tx, rx) = mpsc::channel::<u32>();
    let watchdog = Watchdog::spawn(
        std::process::id(),
        Duration::from_millis(5),
        ProcessTable,
        move |parent| tx.send(parent).expect("send"),
    )
    .expect("spawn watchdog");

    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    assert!(!watchdog.is_finished());
}

#[test]
fn test_reaped_child_is_not_alive() {
    let mut child = Command::new("true").spawn().expect("spawn child");
    let pid = child.id();
    child.wait().expect("wait child");

    assert!(!ProcessTable.is_alive(pid));
}

#[test]
fn test_worker_exits_when_parent_is_gone() {
    let mut parent = Command::new("true").spawn().expect("spawn parent");
    let parent_pid = parent.id();
    parent.wait().expect("wait parent");

    let mut worker = Command::new(env!("CARGO_BIN_EXE_reducto-worker"))
        .arg(parent_pid.to_string())
        .args(["--watchdog-interval-secs", "1"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn worker");

    // Leave a request half-written so the worker is blocked reading it.
    // The worker may already be gone, so a broken pipe is fine here.
    let mut stdin = worker.stdin.take().expect("worker stdin");
    let _ = stdin.write_all(br#"{"Debug": "AGFz"#);
    let _ = stdin.flush();

    let output = worker.wait_with_output().expect("wait worker");
    drop(stdin);

    assert_eq!(output.status.code(), Some(EXIT_ORPHANED));
    assert!(output.stdout.is_empty(), "{:?}", String::from_utf8_lossy(&output.stdout));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(&format!("parent process {parent_pid} exited")),
        "{stderr}"
    );
}
