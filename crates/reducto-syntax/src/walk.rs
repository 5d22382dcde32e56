//! Read-only depth-first traversal.
//!
//! # Example
//!
//! ```
//! use std::ops::ControlFlow;
//! use reducto_syntax::build::*;
//! use reducto_syntax::walk::WalkAction;
//! use reducto_syntax::SyntaxKind;
//!
//! let unit = unit(vec![class("C", vec![method("int", "Main", block(vec![
//!     ret(binary(int(1), BinaryOp::Add, int(2))),
//! ]))])]);
//!
//! let mut literals = 0;
//! let _ = unit.walk(|node| {
//!     if node.kind() == SyntaxKind::LiteralExpression {
//!         literals += 1;
//!     }
//!     ControlFlow::<(), WalkAction>::Continue(WalkAction::Advance)
//! });
//! assert_eq!(literals, 2);
//! assert_eq!(unit.count(SyntaxKind::BinaryExpression), 1);
//! ```

use std::ops::ControlFlow;

use crate::SyntaxKind;
use crate::ast::{
    Block, Expr, ExprKind, ForInit, Member, MemberKind, NodeRef, Stmt, StmtKind, Unit,
};

/// Controls whether to descend into children during a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkAction {
    /// Continue walking and descend into children.
    Advance,
    /// Skip the children of the current node.
    Skip,
}

impl Unit {
    /// Visit every member, statement and expression in pre-order.
    ///
    /// Returns `ControlFlow::Break(b)` if the callback returns `Break(b)`.
    pub fn walk<'a, B>(
        &'a self,
        mut f: impl FnMut(NodeRef<'a>) -> ControlFlow<B, WalkAction>,
    ) -> ControlFlow<B, ()> {
        for member in &self.members {
            walk_member(member, &mut f)?;
        }
        ControlFlow::Continue(())
    }

    /// Number of nodes of the given kind.
    pub fn count(&self, kind: SyntaxKind) -> usize {
        let mut n = 0;
        let _ = self.walk(|node| {
            if node.kind() == kind {
                n += 1;
            }
            ControlFlow::<(), WalkAction>::Continue(WalkAction::Advance)
        });
        n
    }

    /// Whether any member or statement still carries comment trivia.
    pub fn contains_comments(&self) -> bool {
        self.walk(|node| {
            let has_trivia = match node {
                NodeRef::Member(member) => !member.trivia.is_empty(),
                NodeRef::Stmt(stmt) => !stmt.trivia.is_empty(),
                NodeRef::Expr(_) => false,
            };
            if has_trivia {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(WalkAction::Advance)
            }
        })
        .is_break()
    }
}

fn walk_member<'a, B>(
    member: &'a Member,
    f: &mut dyn FnMut(NodeRef<'a>) -> ControlFlow<B, WalkAction>,
) -> ControlFlow<B, ()> {
    if f(NodeRef::Member(member))? == WalkAction::Skip {
        return ControlFlow::Continue(());
    }
    match &member.kind {
        MemberKind::Class(class) => {
            for inner in &class.members {
                walk_member(inner, f)?;
            }
        }
        MemberKind::Field(field) => {
            if let Some(init) = &field.init {
                walk_expr(init, f)?;
            }
        }
        MemberKind::Method(method) => walk_block(&method.body, f)?,
    }
    ControlFlow::Continue(())
}

fn walk_block<'a, B>(
    block: &'a Block,
    f: &mut dyn FnMut(NodeRef<'a>) -> ControlFlow<B, WalkAction>,
) -> ControlFlow<B, ()> {
    for stmt in &block.stmts {
        walk_stmt(stmt, f)?;
    }
    ControlFlow::Continue(())
}

fn walk_stmt<'a, B>(
    stmt: &'a Stmt,
    f: &mut dyn FnMut(NodeRef<'a>) -> ControlFlow<B, WalkAction>,
) -> ControlFlow<B, ()> {
    if f(NodeRef::Stmt(stmt))? == WalkAction::Skip {
        return ControlFlow::Continue(());
    }
    match &stmt.kind {
        StmtKind::Block(block) => walk_block(block, f)?,
        StmtKind::Local(local) => {
            if let Some(init) = &local.init {
                walk_expr(init, f)?;
            }
        }
        StmtKind::Expr(expr) => walk_expr(expr, f)?,
        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            walk_expr(cond, f)?;
            walk_stmt(then_branch, f)?;
            if let Some(else_branch) = else_branch {
                walk_stmt(else_branch, f)?;
            }
        }
        StmtKind::For {
            init,
            cond,
            update,
            body,
        } => {
            match init {
                Some(ForInit::Local(local)) => {
                    if let Some(init) = &local.init {
                        walk_expr(init, f)?;
                    }
                }
                Some(ForInit::Exprs(exprs)) => {
                    for expr in exprs {
                        walk_expr(expr, f)?;
                    }
                }
                None => {}
            }
            if let Some(cond) = cond {
                walk_expr(cond, f)?;
            }
            for expr in update {
                walk_expr(expr, f)?;
            }
            walk_stmt(body, f)?;
        }
        StmtKind::While { cond, body } => {
            walk_expr(cond, f)?;
            walk_stmt(body, f)?;
        }
        StmtKind::DoWhile { body, cond } => {
            walk_stmt(body, f)?;
            walk_expr(cond, f)?;
        }
        StmtKind::Return(value) => {
            if let Some(value) = value {
                walk_expr(value, f)?;
            }
        }
        StmtKind::Break | StmtKind::Continue | StmtKind::Empty => {}
    }
    ControlFlow::Continue(())
}

fn walk_expr<'a, B>(
    expr: &'a Expr,
    f: &mut dyn FnMut(NodeRef<'a>) -> ControlFlow<B, WalkAction>,
) -> ControlFlow<B, ()> {
    if f(NodeRef::Expr(expr))? == WalkAction::Skip {
        return ControlFlow::Continue(());
    }
    match &*expr.kind {
        ExprKind::Literal(_) | ExprKind::Ident(_) => {}
        ExprKind::Unary { operand, .. } => walk_expr(operand, f)?,
        ExprKind::Binary { lhs, rhs, .. } => {
            walk_expr(lhs, f)?;
            walk_expr(rhs, f)?;
        }
        ExprKind::Assign { target, value, .. } => {
            walk_expr(target, f)?;
            walk_expr(value, f)?;
        }
        ExprKind::Cast { expr, .. } => walk_expr(expr, f)?,
        ExprKind::Paren(inner) => walk_expr(inner, f)?,
        ExprKind::Invoke { callee, args } => {
            walk_expr(callee, f)?;
            for arg in args {
                walk_expr(arg, f)?;
            }
        }
        ExprKind::Member { target, .. } => walk_expr(target, f)?,
        ExprKind::Conditional {
            cond,
            then_expr,
            else_expr,
        } => {
            walk_expr(cond, f)?;
            walk_expr(then_expr, f)?;
            walk_expr(else_expr, f)?;
        }
    }
    ControlFlow::Continue(())
}
