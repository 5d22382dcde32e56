//! The removal kinds a pass can target.

use std::str::FromStr;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// One syntactic category a removal pass knows how to delete or simplify.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemovalKind {
    #[display("assignment")]
    Assignment,
    #[display("binary")]
    Binary,
    #[display("cast")]
    Cast,
    #[display("field-declaration")]
    FieldDeclaration,
    #[display("invocation")]
    Invocation,
    #[display("literal")]
    Literal,
    #[display("member-access")]
    MemberAccess,
    #[display("parenthesized")]
    Parenthesized,
    #[display("block")]
    Block,
    #[display("do-while")]
    DoWhile,
    #[display("for")]
    For,
    #[display("if-else")]
    IfElse,
    #[display("expression-statement")]
    ExpressionStatement,
    #[display("diagnostic-log")]
    DiagnosticLog,
}

impl RemovalKind {
    /// Every kind, in the order a driver should try them: diagnostic noise
    /// first, then whole statements, then expression-level simplifications.
    pub const ALL: [RemovalKind; 14] = [
        RemovalKind::DiagnosticLog,
        RemovalKind::For,
        RemovalKind::DoWhile,
        RemovalKind::IfElse,
        RemovalKind::Block,
        RemovalKind::ExpressionStatement,
        RemovalKind::FieldDeclaration,
        RemovalKind::Assignment,
        RemovalKind::Invocation,
        RemovalKind::MemberAccess,
        RemovalKind::Cast,
        RemovalKind::Parenthesized,
        RemovalKind::Binary,
        RemovalKind::Literal,
    ];
}

#[derive(Debug, Display, Error, PartialEq, Eq)]
#[display("unknown removal kind: {name}")]
pub struct UnknownRemovalKind {
    pub name: String,
}

impl FromStr for RemovalKind {
    type Err = UnknownRemovalKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RemovalKind::ALL
            .into_iter()
            .find(|kind| kind.to_string() == s)
            .ok_or_else(|| UnknownRemovalKind { name: s.to_owned() })
    }
}
