//! Per-traversal counting state.

/// How a traversal treats the candidates it finds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassMode {
    /// Count candidates without touching any of them.
    Probe,
    /// Rewrite only the candidate with this zero-based index.
    Nth(usize),
    /// Rewrite every candidate.
    All,
}

/// Counting state for exactly one traversal.
///
/// A fresh context is created at the start of every pass and dropped when
/// the pass returns, so indices can never carry over between traversals.
#[derive(Debug)]
pub struct PassContext {
    target: Option<usize>,
    batch: bool,
    current: usize,
    changed: bool,
}

impl PassContext {
    pub fn new(mode: PassMode) -> Self {
        let (target, batch) = match mode {
            PassMode::Probe => (None, false),
            PassMode::Nth(index) => (Some(index), false),
            PassMode::All => (None, true),
        };
        Self {
            target,
            batch,
            current: 0,
            changed: false,
        }
    }

    pub fn is_batch(&self) -> bool {
        self.batch
    }

    /// Register one more candidate and report whether it is selected.
    pub fn next_candidate(&mut self) -> bool {
        let index = self.current;
        self.current += 1;
        self.batch || self.target == Some(index)
    }

    /// Record that the traversal rewrote or deleted something.
    pub fn record_change(&mut self) {
        self.changed = true;
    }

    /// Number of candidates seen so far.
    pub fn candidates(&self) -> usize {
        self.current
    }

    pub fn changed(&self) -> bool {
        self.changed
    }
}
