//! Expression-level rules.

use std::collections::HashMap;
use std::sync::LazyLock;

use reducto_syntax::build::{binary, int};
use reducto_syntax::{BinaryOp, Expr, ExprKind, NodeRef, SyntaxKind};

use crate::RemovalKind;
use crate::pass::Folder;
use crate::rule::{ReduceOptions, RemovalRule};

const CANONICAL_LHS: i64 = 15;
const CANONICAL_RHS: i64 = 4;

/// Rendered `15 <op> 4` for every operator, computed once per process.
static CANONICAL_BINARY: LazyLock<HashMap<BinaryOp, String>> = LazyLock::new(|| {
    BinaryOp::ALL
        .into_iter()
        .map(|op| (op, canonical_expr(op).to_string()))
        .collect()
});

fn canonical_expr(op: BinaryOp) -> Expr {
    binary(int(CANONICAL_LHS), op, int(CANONICAL_RHS))
}

/// The rendering a binary expression with `op` is simplified to.
pub fn canonical_binary(op: BinaryOp) -> &'static str {
    CANONICAL_BINARY
        .get(&op)
        .map(String::as_str)
        .unwrap_or_default()
}

fn is_expr(node: NodeRef<'_>, kind: SyntaxKind) -> bool {
    matches!(node, NodeRef::Expr(_)) && node.kind() == kind
}

pub(crate) struct AssignmentRule;

impl RemovalRule for AssignmentRule {
    fn kind(&self) -> RemovalKind {
        RemovalKind::Assignment
    }

    fn matches(&self, node: NodeRef<'_>, _options: &ReduceOptions) -> bool {
        is_expr(node, SyntaxKind::AssignmentExpression)
    }

    fn guards_markers(&self) -> bool {
        true
    }

    fn rewrite_expr(&self, _expr: Expr, _folder: &mut Folder<'_>) -> Option<Expr> {
        None
    }
}

pub(crate) struct BinaryRule;

impl RemovalRule for BinaryRule {
    fn kind(&self) -> RemovalKind {
        RemovalKind::Binary
    }

    fn matches(&self, node: NodeRef<'_>, _options: &ReduceOptions) -> bool {
        let NodeRef::Expr(expr) = node else {
            return false;
        };
        match &*expr.kind {
            ExprKind::Binary { op, .. } => node.text() != canonical_binary(*op),
            _ => false,
        }
    }

    fn rewrite_expr(&self, expr: Expr, _folder: &mut Folder<'_>) -> Option<Expr> {
        match *expr.kind {
            ExprKind::Binary { op, .. } => Some(canonical_expr(op)),
            kind => Some(Expr::new(kind)),
        }
    }
}

pub(crate) struct CastRule;

impl RemovalRule for CastRule {
    fn kind(&self) -> RemovalKind {
        RemovalKind::Cast
    }

    fn matches(&self, node: NodeRef<'_>, _options: &ReduceOptions) -> bool {
        is_expr(node, SyntaxKind::CastExpression)
    }

    fn rewrite_expr(&self, expr: Expr, folder: &mut Folder<'_>) -> Option<Expr> {
        let ExprKind::Cast { expr: operand, .. } = *expr.kind else {
            return Some(expr);
        };
        let operand = match *operand.kind {
            ExprKind::Paren(inner) => inner,
            kind => Expr::new(kind),
        };
        folder.fold_expr(operand)
    }
}

pub(crate) struct ParenthesizedRule;

impl RemovalRule for ParenthesizedRule {
    fn kind(&self) -> RemovalKind {
        RemovalKind::Parenthesized
    }

    fn matches(&self, node: NodeRef<'_>, _options: &ReduceOptions) -> bool {
        is_expr(node, SyntaxKind::ParenthesizedExpression)
    }

    fn rewrite_expr(&self, expr: Expr, folder: &mut Folder<'_>) -> Option<Expr> {
        match *expr.kind {
            ExprKind::Paren(inner) => folder.fold_expr(inner),
            kind => Some(Expr::new(kind)),
        }
    }
}

/// Expression rules whose only action is deletion.
macro_rules! deleting_expr_rule {
    ($name:ident, $kind:ident, $syntax:ident) => {
        pub(crate) struct $name;

        impl RemovalRule for $name {
            fn kind(&self) -> RemovalKind {
                RemovalKind::$kind
            }

            fn matches(&self, node: NodeRef<'_>, _options: &ReduceOptions) -> bool {
                is_expr(node, SyntaxKind::$syntax)
            }

            fn rewrite_expr(&self, _expr: Expr, _folder: &mut Folder<'_>) -> Option<Expr> {
                None
            }
        }
    };
}

deleting_expr_rule!(InvocationRule, Invocation, InvocationExpression);
deleting_expr_rule!(LiteralRule, Literal, LiteralExpression);
deleting_expr_rule!(MemberAccessRule, MemberAccess, MemberAccessExpression);
