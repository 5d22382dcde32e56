//! The closed set of syntactic categories.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Tag identifying the syntactic category of a node.
///
/// Every node the tree can hold maps to exactly one of these. Reduction
/// passes select their targets by comparing against this tag.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SyntaxKind {
    // === Declarations ===
    Unit,
    Class,
    FieldDeclaration,
    MethodDeclaration,

    // === Statements ===
    Block,
    LocalDeclaration,
    ExpressionStatement,
    If,
    For,
    While,
    DoWhile,
    Return,
    Break,
    Continue,
    Empty,

    // === Expressions ===
    LiteralExpression,
    Identifier,
    UnaryExpression,
    BinaryExpression,
    AssignmentExpression,
    CastExpression,
    ParenthesizedExpression,
    InvocationExpression,
    MemberAccessExpression,
    ConditionalExpression,
}

impl SyntaxKind {
    /// Whether nodes of this kind are statements.
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::Block
                | SyntaxKind::LocalDeclaration
                | SyntaxKind::ExpressionStatement
                | SyntaxKind::If
                | SyntaxKind::For
                | SyntaxKind::While
                | SyntaxKind::DoWhile
                | SyntaxKind::Return
                | SyntaxKind::Break
                | SyntaxKind::Continue
                | SyntaxKind::Empty
        )
    }

    /// Whether nodes of this kind are expressions.
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            SyntaxKind::LiteralExpression
                | SyntaxKind::Identifier
                | SyntaxKind::UnaryExpression
                | SyntaxKind::BinaryExpression
                | SyntaxKind::AssignmentExpression
                | SyntaxKind::CastExpression
                | SyntaxKind::ParenthesizedExpression
                | SyntaxKind::InvocationExpression
                | SyntaxKind::MemberAccessExpression
                | SyntaxKind::ConditionalExpression
        )
    }
}
