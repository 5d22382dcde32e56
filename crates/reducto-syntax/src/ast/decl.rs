//! Declaration nodes.
//!
//! Declarations form the outer shell of a candidate program:
//! - Classes: `class C { ... }`
//! - Fields: `static int s_1 = 5;`
//! - Methods: `public static int Main() { ... }`

use serde::{Deserialize, Serialize};

use super::expr::Expr;
use super::stmt::{Block, Comment};
use crate::SyntaxKind;

/// A compilation unit.
///
/// This is the root of every tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub members: Vec<Member>,
}

impl Unit {
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }
}

/// A declaration together with its leading comments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Comments preceding the declaration.
    pub trivia: Vec<Comment>,
    pub kind: MemberKind,
}

impl Member {
    pub fn new(kind: MemberKind) -> Self {
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

    pub fn syntax_kind(&self) -> SyntaxKind {
        match &self.kind {
            MemberKind::Class(_) => SyntaxKind::Class,
            MemberKind::Field(_) => SyntaxKind::FieldDeclaration,
            MemberKind::Method(_) => SyntaxKind::MethodDeclaration,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MemberKind {
    Class(ClassDecl),
    Field(FieldDecl),
    Method(MethodDecl),
}

/// Class declaration: `class Name { members }`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub modifiers: Vec<String>,
    pub name: String,
    pub members: Vec<Member>,
}

/// Field declaration: `static long s_2 = 4L;`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub modifiers: Vec<String>,
    pub ty: String,
    pub name: String,
    pub init: Option<Expr>,
}

/// Method declaration: `static int M(int p) { body }`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub modifiers: Vec<String>,
    pub ret: String,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub ty: String,
    pub name: String,
}
