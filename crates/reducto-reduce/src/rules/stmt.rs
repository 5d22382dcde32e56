//! Statement-level rules.

use reducto_syntax::{Block, NodeRef, Stmt, StmtKind, SyntaxKind};

use crate::RemovalKind;
use crate::pass::Folder;
use crate::rule::{ReduceOptions, RemovalRule};

fn is_stmt(node: NodeRef<'_>, kind: SyntaxKind) -> bool {
    matches!(node, NodeRef::Stmt(_)) && node.kind() == kind
}

/// Selected non-empty blocks become `{}`; empty blocks sitting in
/// statement lists are swept without being counted.
pub(crate) struct BlockRule;

impl RemovalRule for BlockRule {
    fn kind(&self) -> RemovalKind {
        RemovalKind::Block
    }

    fn matches(&self, node: NodeRef<'_>, _options: &ReduceOptions) -> bool {
        matches!(node, NodeRef::Stmt(Stmt { kind: StmtKind::Block(block), .. }) if !block.is_empty())
    }

    fn sweeps(&self, stmt: &Stmt) -> bool {
        matches!(&stmt.kind, StmtKind::Block(block) if block.is_empty())
    }

    fn rewrite_stmt(&self, _stmt: Stmt, _folder: &mut Folder<'_>) -> Option<Stmt> {
        Some(Stmt::new(StmtKind::Block(Block::default())))
    }
}

pub(crate) struct IfElseRule;

impl RemovalRule for IfElseRule {
    fn kind(&self) -> RemovalKind {
        RemovalKind::IfElse
    }

    fn matches(&self, node: NodeRef<'_>, _options: &ReduceOptions) -> bool {
        is_stmt(node, SyntaxKind::If)
    }

    /// An `if` mentioning a loop-control variable guards the loop's exit.
    fn guards_markers(&self) -> bool {
        true
    }

    fn rewrite_stmt(&self, _stmt: Stmt, _folder: &mut Folder<'_>) -> Option<Stmt> {
        None
    }
}

/// Deletes every statement whose text begins with the diagnostic prefix.
/// Only ever runs in batch mode.
pub(crate) struct DiagnosticLogRule;

impl RemovalRule for DiagnosticLogRule {
    fn kind(&self) -> RemovalKind {
        RemovalKind::DiagnosticLog
    }

    fn matches(&self, node: NodeRef<'_>, options: &ReduceOptions) -> bool {
        matches!(node, NodeRef::Stmt(_)) && node.text().starts_with(&options.diagnostic_prefix)
    }

    fn batch_only(&self) -> bool {
        true
    }

    fn rewrite_stmt(&self, _stmt: Stmt, _folder: &mut Folder<'_>) -> Option<Stmt> {
        None
    }
}

macro_rules! deleting_stmt_rule {
    ($name:ident, $kind:ident, $syntax:ident) => {
        pub(crate) struct $name;

        impl RemovalRule for $name {
            fn kind(&self) -> RemovalKind {
                RemovalKind::$kind
            }

            fn matches(&self, node: NodeRef<'_>, _options: &ReduceOptions) -> bool {
                is_stmt(node, SyntaxKind::$syntax)
            }

            fn rewrite_stmt(&self, _stmt: Stmt, _folder: &mut Folder<'_>) -> Option<Stmt> {
                None
            }
        }
    };
}

deleting_stmt_rule!(DoWhileRule, DoWhile, DoWhile);
deleting_stmt_rule!(ForRule, For, For);
deleting_stmt_rule!(ExpressionStatementRule, ExpressionStatement, ExpressionStatement);
