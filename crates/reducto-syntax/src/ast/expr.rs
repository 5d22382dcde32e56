//! Expression nodes.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::SyntaxKind;

/// An expression node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    /// The kind of expression.
    pub kind: Box<ExprKind>,
}

impl Expr {
    /// Create a new expression of the given kind.
    pub fn new(kind: ExprKind) -> Self {
        Self {
            kind: Box::new(kind),
        }
    }

    /// The syntactic category of this expression.
    pub fn syntax_kind(&self) -> SyntaxKind {
        match &*self.kind {
            ExprKind::Literal(_) => SyntaxKind::LiteralExpression,
            ExprKind::Ident(_) => SyntaxKind::Identifier,
            ExprKind::Unary { .. } => SyntaxKind::UnaryExpression,
            ExprKind::Binary { .. } => SyntaxKind::BinaryExpression,
            ExprKind::Assign { .. } => SyntaxKind::AssignmentExpression,
            ExprKind::Cast { .. } => SyntaxKind::CastExpression,
            ExprKind::Paren(_) => SyntaxKind::ParenthesizedExpression,
            ExprKind::Invoke { .. } => SyntaxKind::InvocationExpression,
            ExprKind::Member { .. } => SyntaxKind::MemberAccessExpression,
            ExprKind::Conditional { .. } => SyntaxKind::ConditionalExpression,
        }
    }
}

/// The different kinds of expressions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    /// Constant: `42`, `7L`, `1.5`, `true`, `'c'`, `"s"`, `null`
    Literal(Literal),

    /// Name reference: `x`, `Console`
    Ident(String),

    /// Prefix or postfix operator: `-x`, `!b`, `i++`
    Unary { op: UnaryOp, operand: Expr },

    /// Binary operator: `a + b`
    Binary { op: BinaryOp, lhs: Expr, rhs: Expr },

    /// Simple or compound assignment: `x = y`, `x += 1`
    Assign {
        op: AssignOp,
        target: Expr,
        value: Expr,
    },

    /// Explicit conversion: `(long)x`
    Cast { ty: String, expr: Expr },

    /// Parenthesized expression: `(a + b)`
    Paren(Expr),

    /// Call: `M(a, b)`, `s.M()`
    Invoke { callee: Expr, args: Vec<Expr> },

    /// Member access: `s.field`
    Member { target: Expr, name: String },

    /// Ternary: `c ? a : b`
    Conditional {
        cond: Expr,
        then_expr: Expr,
        else_expr: Expr,
    },
}

/// Literal constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Int(i64),
    Long(i64),
    Double(f64),
    Bool(bool),
    Char(char),
    Str(String),
    Null,
}

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    #[display("+")]
    Add,
    #[display("-")]
    Sub,
    #[display("*")]
    Mul,
    #[display("/")]
    Div,
    #[display("%")]
    Rem,
    #[display("<<")]
    Shl,
    #[display(">>")]
    Shr,
    #[display("&")]
    BitAnd,
    #[display("|")]
    BitOr,
    #[display("^")]
    BitXor,
    #[display("&&")]
    And,
    #[display("||")]
    Or,
    #[display("==")]
    Eq,
    #[display("!=")]
    Ne,
    #[display("<")]
    Lt,
    #[display("<=")]
    Le,
    #[display(">")]
    Gt,
    #[display(">=")]
    Ge,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 18] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Rem,
        BinaryOp::Shl,
        BinaryOp::Shr,
        BinaryOp::BitAnd,
        BinaryOp::BitOr,
        BinaryOp::BitXor,
        BinaryOp::And,
        BinaryOp::Or,
        BinaryOp::Eq,
        BinaryOp::Ne,
        BinaryOp::Lt,
        BinaryOp::Le,
        BinaryOp::Gt,
        BinaryOp::Ge,
    ];
}

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignOp {
    #[display("=")]
    Assign,
    #[display("+=")]
    AddAssign,
    #[display("-=")]
    SubAssign,
    #[display("*=")]
    MulAssign,
    #[display("/=")]
    DivAssign,
    #[display("%=")]
    RemAssign,
    #[display("&=")]
    AndAssign,
    #[display("|=")]
    OrAssign,
    #[display("^=")]
    XorAssign,
    #[display("<<=")]
    ShlAssign,
    #[display(">>=")]
    ShrAssign,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Not,
    BitNot,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

impl UnaryOp {
    /// Operator token.
    pub fn token(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::PreInc | UnaryOp::PostInc => "++",
            UnaryOp::PreDec | UnaryOp::PostDec => "--",
        }
    }

    pub fn is_postfix(self) -> bool {
        matches!(self, UnaryOp::PostInc | UnaryOp::PostDec)
    }
}
