use reducto_syntax::{Member, NodeRef, SyntaxKind};

use crate::RemovalKind;
use crate::pass::Folder;
use crate::rule::{ReduceOptions, RemovalRule};

pub(crate) struct FieldDeclarationRule;

impl RemovalRule for FieldDeclarationRule {
    fn kind(&self) -> RemovalKind {
        RemovalKind::FieldDeclaration
    }

    fn matches(&self, node: NodeRef<'_>, _options: &ReduceOptions) -> bool {
        matches!(node, NodeRef::Member(_)) && node.kind() == SyntaxKind::FieldDeclaration
    }

    fn guards_markers(&self) -> bool {
        true
    }

    fn rewrite_member(&self, _member: Member, _folder: &mut Folder<'_>) -> Option<Member> {
        None
    }
}
