//! Typed syntax tree for candidate programs.
//!
//! The tree is a closed set of node types. Declarations ([`Member`]) and
//! statements ([`Stmt`]) may carry leading comment trivia; expressions never
//! do. Every node reports its [`SyntaxKind`](crate::SyntaxKind).

mod decl;
mod expr;
mod stmt;

pub use decl::{ClassDecl, FieldDecl, Member, MemberKind, MethodDecl, Param, Unit};
pub use expr::{AssignOp, BinaryOp, Expr, ExprKind, Literal, UnaryOp};
pub use stmt::{Block, Comment, ForInit, LocalDecl, Stmt, StmtKind};

use crate::SyntaxKind;
use crate::render::Printer;

/// A borrowed view of any node that has a syntax kind of its own.
#[derive(Clone, Copy, Debug)]
pub enum NodeRef<'a> {
    Member(&'a Member),
    Stmt(&'a Stmt),
    Expr(&'a Expr),
}

impl NodeRef<'_> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeRef::Member(member) => member.syntax_kind(),
            NodeRef::Stmt(stmt) => stmt.syntax_kind(),
            NodeRef::Expr(expr) => expr.syntax_kind(),
        }
    }

    /// Render the node as source text with all comment trivia omitted.
    ///
    /// Textual checks over a node (loop-control markers, call prefixes)
    /// run against this rendering.
    pub fn text(&self) -> String {
        let mut out = String::new();
        let mut printer = Printer::new(&mut out).without_trivia();
        // Writing into a String cannot fail.
        let _ = match self {
            NodeRef::Member(member) => printer.member(member),
            NodeRef::Stmt(stmt) => printer.stmt(stmt),
            NodeRef::Expr(expr) => printer.expr(expr),
        };
        out
    }
}
