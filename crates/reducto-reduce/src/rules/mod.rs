//! The fourteen removal rules and the table that selects between them.

mod decl;
mod expr;
mod stmt;

use crate::RemovalKind;
use crate::rule::RemovalRule;

pub use expr::canonical_binary;

/// Dispatch table from removal kind to the rule implementing it.
pub(crate) fn rule_for(kind: RemovalKind) -> &'static dyn RemovalRule {
    match kind {
        RemovalKind::Assignment => &expr::AssignmentRule,
        RemovalKind::Binary => &expr::BinaryRule,
        RemovalKind::Cast => &expr::CastRule,
        RemovalKind::Invocation => &expr::InvocationRule,
        RemovalKind::Literal => &expr::LiteralRule,
        RemovalKind::MemberAccess => &expr::MemberAccessRule,
        RemovalKind::Parenthesized => &expr::ParenthesizedRule,
        RemovalKind::FieldDeclaration => &decl::FieldDeclarationRule,
        RemovalKind::Block => &stmt::BlockRule,
        RemovalKind::DoWhile => &stmt::DoWhileRule,
        RemovalKind::For => &stmt::ForRule,
        RemovalKind::IfElse => &stmt::IfElseRule,
        RemovalKind::ExpressionStatement => &stmt::ExpressionStatementRule,
        RemovalKind::DiagnosticLog => &stmt::DiagnosticLogRule,
    }
}
