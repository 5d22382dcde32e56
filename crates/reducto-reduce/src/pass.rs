//! Driving a single removal rule over a whole tree.

use reducto_syntax::{
    Block, ClassDecl, Expr, ExprKind, FieldDecl, ForInit, LocalDecl, Member, MemberKind,
    MethodDecl, NodeRef, Stmt, StmtKind, Unit,
};

use crate::context::{PassContext, PassMode};
use crate::rule::{ReduceOptions, RemovalRule};
use crate::rules::rule_for;
use crate::RemovalKind;

/// Result of running a pass over a tree.
#[derive(Clone, Debug)]
pub struct PassOutcome {
    /// The rebuilt tree.
    pub unit: Unit,
    /// Number of matching, unprotected nodes seen during the traversal.
    pub candidates: usize,
    /// Whether at least one node was rewritten or deleted.
    pub changed: bool,
}

/// A reduction pass targeting one [`RemovalKind`].
///
/// # Example
///
/// ```
/// use reducto_reduce::{PassMode, RemovalKind, RemovalPass};
/// use reducto_syntax::build::*;
///
/// let tree = unit(vec![class("C", vec![method("void", "M", block(vec![
///     expr_stmt(call("A", vec![])),
///     expr_stmt(call("B", vec![])),
/// ]))])]);
///
/// let pass = RemovalPass::new(RemovalKind::ExpressionStatement);
/// let count = pass.probe(&tree);
/// assert_eq!(count, 2);
///
/// let outcome = pass.apply(&tree, PassMode::Nth(1));
/// assert!(outcome.changed);
/// assert_eq!(outcome.unit.to_string(), "class C {\n    static void M() {\n        A();\n    }\n}\n");
/// ```
#[derive(Clone, Debug)]
pub struct RemovalPass {
    kind: RemovalKind,
    options: ReduceOptions,
}

impl RemovalPass {
    pub fn new(kind: RemovalKind) -> Self {
        Self {
            kind,
            options: ReduceOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ReduceOptions) -> Self {
        self.options = options;
        self
    }

    pub fn kind(&self) -> RemovalKind {
        self.kind
    }

    /// Count the candidates in `unit` without rewriting any of them.
    pub fn probe(&self, unit: &Unit) -> usize {
        self.apply(unit, PassMode::Probe).candidates
    }

    /// Run one full traversal over a copy of `unit`.
    ///
    /// Comment trivia is dropped everywhere regardless of mode.
    pub fn apply(&self, unit: &Unit, mode: PassMode) -> PassOutcome {
        let rule = rule_for(self.kind);
        let mut folder = Folder {
            rule,
            options: &self.options,
            cx: PassContext::new(mode),
        };
        let members = folder.fold_members(unit.members.clone());

        let outcome = PassOutcome {
            unit: Unit::new(members),
            candidates: folder.cx.candidates(),
            changed: folder.cx.changed(),
        };
        tracing::debug!(
            kind = %self.kind,
            ?mode,
            candidates = outcome.candidates,
            changed = outcome.changed,
            "removal pass finished"
        );
        outcome
    }
}

/// The traversal itself: rebuilds the tree, consulting the rule at every node.
pub(crate) struct Folder<'p> {
    rule: &'p dyn RemovalRule,
    options: &'p ReduceOptions,
    cx: PassContext,
}

impl Folder<'_> {
    /// Decide whether `node` is a candidate and, if so, whether it is selected.
    fn select(&mut self, node: NodeRef<'_>) -> bool {
        if self.rule.batch_only() && !self.cx.is_batch() {
            return false;
        }
        if !self.rule.matches(node, self.options) || self.rule.is_protected(node, self.options) {
            return false;
        }
        if !self.cx.next_candidate() {
            return false;
        }
        self.cx.record_change();
        tracing::trace!(
            kind = %self.rule.kind(),
            index = self.cx.candidates() - 1,
            node = %node.text(),
            "rewriting candidate"
        );
        true
    }

    /// Whether `node` mentions a marker the current rule guards.
    fn shields(&self, node: NodeRef<'_>) -> bool {
        self.rule.guards_markers() && self.options.mentions_marker(node)
    }

    // === Declarations ===

    fn fold_members(&mut self, members: Vec<Member>) -> Vec<Member> {
        members
            .into_iter()
            .filter_map(|member| self.fold_member(member))
            .collect()
    }

    fn fold_member(&mut self, mut member: Member) -> Option<Member> {
        member.trivia.clear();
        if self.select(NodeRef::Member(&member)) {
            let rule = self.rule;
            return rule.rewrite_member(member, self);
        }

        let kind = match member.kind {
            MemberKind::Class(class) => MemberKind::Class(ClassDecl {
                members: self.fold_members(class.members),
                ..class
            }),
            MemberKind::Field(field) => MemberKind::Field(FieldDecl {
                init: field.init.and_then(|init| self.fold_expr(init)),
                ..field
            }),
            MemberKind::Method(method) => MemberKind::Method(MethodDecl {
                body: self.fold_block(method.body),
                ..method
            }),
        };
        Some(Member { kind, ..member })
    }

    // === Statements ===

    fn fold_block(&mut self, block: Block) -> Block {
        Block::new(self.fold_stmts(block.stmts))
    }

    fn fold_stmts(&mut self, stmts: Vec<Stmt>) -> Vec<Stmt> {
        let mut folded = Vec::with_capacity(stmts.len());
        for stmt in stmts {
            if self.rule.sweeps(&stmt) {
                self.cx.record_change();
                continue;
            }
            folded.extend(self.fold_stmt(stmt));
        }
        folded
    }

    /// Fold a statement in a position that cannot be left empty.
    fn fold_body(&mut self, body: Box<Stmt>) -> Box<Stmt> {
        Box::new(self.fold_stmt(*body).unwrap_or_else(Stmt::empty))
    }

    fn fold_stmt(&mut self, mut stmt: Stmt) -> Option<Stmt> {
        stmt.trivia.clear();
        if self.select(NodeRef::Stmt(&stmt)) {
            let rule = self.rule;
            return rule.rewrite_stmt(stmt, self);
        }
        let shielded = self.shields(NodeRef::Stmt(&stmt));

        let kind = match stmt.kind {
            StmtKind::Block(block) => StmtKind::Block(self.fold_block(block)),
            StmtKind::Local(local) => StmtKind::Local(self.fold_local(local)),
            StmtKind::Expr(expr) => StmtKind::Expr(self.fold_required(expr, shielded)?),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond = self.fold_required(cond, shielded);
                let then_branch = self.fold_body(then_branch);
                let else_branch = else_branch
                    .and_then(|branch| self.fold_stmt(*branch))
                    .map(Box::new);
                StmtKind::If {
                    cond: cond?,
                    then_branch,
                    else_branch,
                }
            }
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => {
                let init = match init {
                    Some(ForInit::Local(local)) => Some(ForInit::Local(self.fold_local(local))),
                    Some(ForInit::Exprs(exprs)) => {
                        let exprs = self.fold_exprs(exprs);
                        (!exprs.is_empty()).then_some(ForInit::Exprs(exprs))
                    }
                    None => None,
                };
                let cond = cond.and_then(|cond| self.fold_expr(cond));
                let update = self.fold_exprs(update);
                let body = self.fold_body(body);
                StmtKind::For {
                    init,
                    cond,
                    update,
                    body,
                }
            }
            StmtKind::While { cond, body } => {
                let cond = self.fold_required(cond, shielded);
                let body = self.fold_body(body);
                StmtKind::While { cond: cond?, body }
            }
            StmtKind::DoWhile { body, cond } => {
                let body = self.fold_body(body);
                let cond = self.fold_required(cond, shielded);
                StmtKind::DoWhile { body, cond: cond? }
            }
            StmtKind::Return(value) => StmtKind::Return(value.and_then(|value| self.fold_expr(value))),
            kind @ (StmtKind::Break | StmtKind::Continue | StmtKind::Empty) => kind,
        };
        Some(Stmt { kind, ..stmt })
    }

    fn fold_local(&mut self, local: LocalDecl) -> LocalDecl {
        LocalDecl {
            init: local.init.and_then(|init| self.fold_expr(init)),
            ..local
        }
    }

    // === Expressions ===

    fn fold_exprs(&mut self, exprs: Vec<Expr>) -> Vec<Expr> {
        exprs
            .into_iter()
            .filter_map(|expr| self.fold_expr(expr))
            .collect()
    }

    /// Fold an expression. Absence of a required operand makes the whole
    /// expression absent, unless the expression is shielded.
    pub(crate) fn fold_expr(&mut self, expr: Expr) -> Option<Expr> {
        if self.select(NodeRef::Expr(&expr)) {
            let rule = self.rule;
            return rule.rewrite_expr(expr, self);
        }
        let shielded = !matches!(*expr.kind, ExprKind::Literal(_) | ExprKind::Ident(_))
            && self.shields(NodeRef::Expr(&expr));

        let kind = match *expr.kind {
            kind @ (ExprKind::Literal(_) | ExprKind::Ident(_)) => kind,
            ExprKind::Unary { op, operand } => ExprKind::Unary {
                op,
                operand: self.fold_required(operand, shielded)?,
            },
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.fold_required(lhs, shielded);
                let rhs = self.fold_required(rhs, shielded);
                ExprKind::Binary {
                    op,
                    lhs: lhs?,
                    rhs: rhs?,
                }
            }
            ExprKind::Assign { op, target, value } => {
                let target = self.fold_required(target, shielded);
                let value = self.fold_required(value, shielded);
                ExprKind::Assign {
                    op,
                    target: target?,
                    value: value?,
                }
            }
            ExprKind::Cast { ty, expr } => ExprKind::Cast {
                ty,
                expr: self.fold_required(expr, shielded)?,
            },
            ExprKind::Paren(inner) => ExprKind::Paren(self.fold_required(inner, shielded)?),
            ExprKind::Invoke { callee, args } => {
                let callee = self.fold_required(callee, shielded);
                let args = self.fold_exprs(args);
                ExprKind::Invoke {
                    callee: callee?,
                    args,
                }
            }
            ExprKind::Member { target, name } => ExprKind::Member {
                target: self.fold_required(target, shielded)?,
                name,
            },
            ExprKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                let cond = self.fold_required(cond, shielded);
                let then_expr = self.fold_required(then_expr, shielded);
                let else_expr = self.fold_required(else_expr, shielded);
                ExprKind::Conditional {
                    cond: cond?,
                    then_expr: then_expr?,
                    else_expr: else_expr?,
                }
            }
        };
        Some(Expr::new(kind))
    }

    /// Fold an operand the parent cannot do without. A shielded parent
    /// keeps the original operand instead of disappearing.
    fn fold_required(&mut self, expr: Expr, shielded: bool) -> Option<Expr> {
        if !shielded {
            return self.fold_expr(expr);
        }
        let original = expr.clone();
        Some(self.fold_expr(expr).unwrap_or(original))
    }
}
