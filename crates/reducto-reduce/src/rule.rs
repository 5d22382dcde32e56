//! The removal rule interface.

use reducto_syntax::{Expr, Member, NodeRef, Stmt};
use serde::{Deserialize, Serialize};

use crate::RemovalKind;
use crate::pass::Folder;

/// Textual knobs shared by every rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReduceOptions {
    /// Substrings naming loop-control variables. Nodes of the protecting
    /// kinds whose text contains any of them are never counted or removed.
    pub protection_markers: Vec<String>,
    /// Statements whose text starts with this are diagnostic-log calls.
    pub diagnostic_prefix: String,
}

impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            protection_markers: vec!["__loopvar".to_owned(), "__loopSecretVar".to_owned()],
            diagnostic_prefix: "Log(".to_owned(),
        }
    }
}

impl ReduceOptions {
    /// Whether the node's text mentions a loop-control marker.
    pub fn mentions_marker(&self, node: NodeRef<'_>) -> bool {
        let text = node.text();
        self.protection_markers
            .iter()
            .any(|marker| text.contains(marker.as_str()))
    }
}

/// Knows how to delete or simplify exactly one kind of node.
///
/// The traversal asks `matches` and `is_protected` for every node it
/// visits; a matching, unprotected node is a candidate. Under a rule that
/// guards markers, any node whose text mentions one keeps its required
/// children even when they fold to nothing, so marker-bearing code is
/// never removed by propagation either. When a candidate
/// is selected the traversal hands it to the `rewrite_*` hook for its
/// category and does not descend into its original children. Returning
/// `None` means the node is absent from the new tree.
pub(crate) trait RemovalRule: Sync {
    fn kind(&self) -> RemovalKind;

    fn matches(&self, node: NodeRef<'_>, options: &ReduceOptions) -> bool;

    /// Whether nodes mentioning a protection marker are left alone.
    fn guards_markers(&self) -> bool {
        false
    }

    fn is_protected(&self, node: NodeRef<'_>, options: &ReduceOptions) -> bool {
        self.guards_markers() && options.mentions_marker(node)
    }

    /// Rules that only make sense applied everywhere at once.
    fn batch_only(&self) -> bool {
        false
    }

    /// Statements dropped from statement lists, before being visited and
    /// without being counted.
    fn sweeps(&self, _stmt: &Stmt) -> bool {
        false
    }

    fn rewrite_member(&self, member: Member, _folder: &mut Folder<'_>) -> Option<Member> {
        Some(member)
    }

    fn rewrite_stmt(&self, stmt: Stmt, _folder: &mut Folder<'_>) -> Option<Stmt> {
        Some(stmt)
    }

    fn rewrite_expr(&self, expr: Expr, _folder: &mut Folder<'_>) -> Option<Expr> {
        Some(expr)
    }
}
