//! Syntax-tree reduction passes.
//!
//! A [`RemovalPass`] knows how to delete or simplify exactly one
//! [`RemovalKind`] of node. Each call to [`RemovalPass::apply`] performs one
//! depth-first traversal over a copy of the tree with its own counting
//! context, so a driver typically does:
//!
//! 1. `probe` to learn how many candidates the tree holds;
//! 2. `apply(.., PassMode::Nth(k))` for some `k` below that count;
//! 3. recompile and keep the result if the defect still reproduces.
//!
//! Every traversal drops comment trivia, whatever the targeted kind.

mod context;
mod kind;
mod pass;
mod rule;
mod rules;

#[cfg(test)]
mod tests;

pub use context::{PassContext, PassMode};
pub use kind::{RemovalKind, UnknownRemovalKind};
pub use pass::{PassOutcome, RemovalPass};
pub use rule::ReduceOptions;
pub use rules::canonical_binary;
