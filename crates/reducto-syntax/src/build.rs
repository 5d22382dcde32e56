//! Terse constructors for building trees by hand.
//!
//! Front ends lower their own parse trees with these; tests use them to
//! spell out candidate programs.

pub use crate::ast::{AssignOp, BinaryOp, Comment, UnaryOp};

use crate::ast::{
    Block, ClassDecl, Expr, ExprKind, FieldDecl, ForInit, Literal, LocalDecl, Member, MemberKind,
    MethodDecl, Param, Stmt, StmtKind, Unit,
};

// === Declarations ===

pub fn unit(members: Vec<Member>) -> Unit {
    Unit::new(members)
}

pub fn class(name: &str, members: Vec<Member>) -> Member {
    Member::new(MemberKind::Class(ClassDecl {
        modifiers: Vec::new(),
        name: name.to_owned(),
        members,
    }))
}

/// `static <ty> <name> [= init];`
pub fn field(ty: &str, name: &str, init: Option<Expr>) -> Member {
    Member::new(MemberKind::Field(FieldDecl {
        modifiers: vec!["static".to_owned()],
        ty: ty.to_owned(),
        name: name.to_owned(),
        init,
    }))
}

/// `static <ret> <name>() { body }`
pub fn method(ret: &str, name: &str, body: Block) -> Member {
    method_with_params(ret, name, Vec::new(), body)
}

pub fn method_with_params(ret: &str, name: &str, params: Vec<(&str, &str)>, body: Block) -> Member {
    Member::new(MemberKind::Method(MethodDecl {
        modifiers: vec!["static".to_owned()],
        ret: ret.to_owned(),
        name: name.to_owned(),
        params: params
            .into_iter()
            .map(|(ty, name)| Param {
                ty: ty.to_owned(),
                name: name.to_owned(),
            })
            .collect(),
        body,
    }))
}

// === Statements ===

pub fn block(stmts: Vec<Stmt>) -> Block {
    Block::new(stmts)
}

/// A nested block used as a statement.
pub fn block_stmt(stmts: Vec<Stmt>) -> Stmt {
    Stmt::new(StmtKind::Block(Block::new(stmts)))
}

pub fn local(ty: &str, name: &str, init: Option<Expr>) -> Stmt {
    Stmt::new(StmtKind::Local(local_decl(ty, name, init)))
}

pub fn local_decl(ty: &str, name: &str, init: Option<Expr>) -> LocalDecl {
    LocalDecl {
        ty: ty.to_owned(),
        name: name.to_owned(),
        init,
    }
}

pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::new(StmtKind::Expr(expr))
}

pub fn r#if(cond: Expr, then_branch: Stmt, else_branch: Option<Stmt>) -> Stmt {
    Stmt::new(StmtKind::If {
        cond,
        then_branch: Box::new(then_branch),
        else_branch: else_branch.map(Box::new),
    })
}

pub fn r#for(init: Option<ForInit>, cond: Option<Expr>, update: Vec<Expr>, body: Stmt) -> Stmt {
    Stmt::new(StmtKind::For {
        init,
        cond,
        update,
        body: Box::new(body),
    })
}

pub fn r#while(cond: Expr, body: Stmt) -> Stmt {
    Stmt::new(StmtKind::While {
        cond,
        body: Box::new(body),
    })
}

pub fn do_while(body: Stmt, cond: Expr) -> Stmt {
    Stmt::new(StmtKind::DoWhile {
        body: Box::new(body),
        cond,
    })
}

pub fn ret(value: Expr) -> Stmt {
    Stmt::new(StmtKind::Return(Some(value)))
}

pub fn ret_void() -> Stmt {
    Stmt::new(StmtKind::Return(None))
}

pub fn r#break() -> Stmt {
    Stmt::new(StmtKind::Break)
}

pub fn r#continue() -> Stmt {
    Stmt::new(StmtKind::Continue)
}

pub fn line_comment(text: &str) -> Comment {
    Comment::Line(text.to_owned())
}

pub fn block_comment(text: &str) -> Comment {
    Comment::Block(text.to_owned())
}

// === Expressions ===

pub fn int(value: i64) -> Expr {
    Expr::new(ExprKind::Literal(Literal::Int(value)))
}

pub fn long(value: i64) -> Expr {
    Expr::new(ExprKind::Literal(Literal::Long(value)))
}

pub fn double(value: f64) -> Expr {
    Expr::new(ExprKind::Literal(Literal::Double(value)))
}

pub fn boolean(value: bool) -> Expr {
    Expr::new(ExprKind::Literal(Literal::Bool(value)))
}

pub fn string(value: &str) -> Expr {
    Expr::new(ExprKind::Literal(Literal::Str(value.to_owned())))
}

pub fn ident(name: &str) -> Expr {
    Expr::new(ExprKind::Ident(name.to_owned()))
}

pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    Expr::new(ExprKind::Unary { op, operand })
}

pub fn binary(lhs: Expr, op: BinaryOp, rhs: Expr) -> Expr {
    Expr::new(ExprKind::Binary { op, lhs, rhs })
}

/// `target = value`
pub fn assign(target: Expr, value: Expr) -> Expr {
    compound(target, AssignOp::Assign, value)
}

/// `target <op> value`, e.g. `x += 1`
pub fn compound(target: Expr, op: AssignOp, value: Expr) -> Expr {
    Expr::new(ExprKind::Assign { op, target, value })
}

pub fn cast(ty: &str, expr: Expr) -> Expr {
    Expr::new(ExprKind::Cast {
        ty: ty.to_owned(),
        expr,
    })
}

pub fn paren(inner: Expr) -> Expr {
    Expr::new(ExprKind::Paren(inner))
}

/// Call of a plain name: `name(args)`
pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    invoke(ident(name), args)
}

pub fn invoke(callee: Expr, args: Vec<Expr>) -> Expr {
    Expr::new(ExprKind::Invoke { callee, args })
}

pub fn member(target: Expr, name: &str) -> Expr {
    Expr::new(ExprKind::Member {
        target,
        name: name.to_owned(),
    })
}

pub fn conditional(cond: Expr, then_expr: Expr, else_expr: Expr) -> Expr {
    Expr::new(ExprKind::Conditional {
        cond,
        then_expr,
        else_expr,
    })
}
