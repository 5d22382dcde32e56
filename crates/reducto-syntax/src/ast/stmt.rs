//! Statement nodes and comment trivia.

use serde::{Deserialize, Serialize};

use super::expr::Expr;
use crate::SyntaxKind;

/// A comment attached to the node that follows it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comment {
    /// `// text`
    Line(String),
    /// `/* text */`
    Block(String),
}

/// A braced statement list: `{ stmt1; stmt2; }`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

/// A statement together with its leading comments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    /// Comments preceding the statement.
    pub trivia: Vec<Comment>,
    pub kind: StmtKind,
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Self {
            trivia: Vec::new(),
            kind,
        }
    }

    /// Attach a leading comment.
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.trivia.push(comment);
        self
    }

    /// The empty statement `;`.
    pub fn empty() -> Self {
        Self::new(StmtKind::Empty)
    }

    pub fn syntax_kind(&self) -> SyntaxKind {
        match &self.kind {
            StmtKind::Block(_) => SyntaxKind::Block,
            StmtKind::Local(_) => SyntaxKind::LocalDeclaration,
            StmtKind::Expr(_) => SyntaxKind::ExpressionStatement,
            StmtKind::If { .. } => SyntaxKind::If,
            StmtKind::For { .. } => SyntaxKind::For,
            StmtKind::While { .. } => SyntaxKind::While,
            StmtKind::DoWhile { .. } => SyntaxKind::DoWhile,
            StmtKind::Return(_) => SyntaxKind::Return,
            StmtKind::Break => SyntaxKind::Break,
            StmtKind::Continue => SyntaxKind::Continue,
            StmtKind::Empty => SyntaxKind::Empty,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StmtKind {
    Block(Block),

    /// `int x = 1;`
    Local(LocalDecl),

    /// Expression evaluated for its effect: `M();`, `x = 1;`
    Expr(Expr),

    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    For {
        init: Option<ForInit>,
        cond: Option<Expr>,
        update: Vec<Expr>,
        body: Box<Stmt>,
    },

    While {
        cond: Expr,
        body: Box<Stmt>,
    },

    DoWhile {
        body: Box<Stmt>,
        cond: Expr,
    },

    Return(Option<Expr>),
    Break,
    Continue,

    /// `;`
    Empty,
}

/// Local variable declaration: `int x = 1`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalDecl {
    pub ty: String,
    pub name: String,
    pub init: Option<Expr>,
}

/// Initializer clause of a `for` loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ForInit {
    Local(LocalDecl),
    Exprs(Vec<Expr>),
}
