//! Syntax tree model for reducto.
//!
//! Candidate programs are held as a closed, typed tree ([`Unit`] at the
//! root) that reduction passes rebuild functionally. Nodes render back to
//! source text through [`render::Printer`], and the whole tree round-trips
//! through serde so a front end living in another process can hand it over.

pub mod ast;
pub mod build;
pub mod kind;
pub mod render;
pub mod walk;

#[cfg(test)]
mod tests;

pub use ast::{
    AssignOp, BinaryOp, Block, ClassDecl, Comment, Expr, ExprKind, FieldDecl, ForInit, Literal,
    LocalDecl, Member, MemberKind, MethodDecl, NodeRef, Param, Stmt, StmtKind, UnaryOp, Unit,
};
pub use kind::SyntaxKind;
