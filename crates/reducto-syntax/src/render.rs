//! Canonical source rendering.
//!
//! Produces C-family source text with four-space indentation and one
//! statement per line:
//!
//! ```text
//! class Program {
//!     static int s_1 = 5;
//!     // entry
//!     public static int Main() {
//!         s_1 += 2;
//!         return s_1;
//!     }
//! }
//! ```
//!
//! Line-level items (declarations, statements) never end with a newline;
//! the enclosing container appends it.

use std::fmt::{self, Write};

use crate::ast::{
    Block, Comment, Expr, ExprKind, ForInit, Literal, LocalDecl, Member, MemberKind, Stmt,
    StmtKind, Unit,
};

const INDENT: &str = "    ";

/// Writes tree nodes as source text.
pub struct Printer<'w, W: Write> {
    out: &'w mut W,
    indent: usize,
    trivia: bool,
}

impl<'w, W: Write> Printer<'w, W> {
    pub fn new(out: &'w mut W) -> Self {
        Self {
            out,
            indent: 0,
            trivia: true,
        }
    }

    /// Omit all comment trivia from the output.
    pub fn without_trivia(mut self) -> Self {
        self.trivia = false;
        self
    }

    fn write_indent(&mut self) -> fmt::Result {
        for _ in 0..self.indent {
            self.out.write_str(INDENT)?;
        }
        Ok(())
    }

    fn comment(&mut self, comment: &Comment) -> fmt::Result {
        match comment {
            Comment::Line(text) => write!(self.out, "// {text}"),
            Comment::Block(text) => write!(self.out, "/* {text} */"),
        }
    }

    /// Comments on their own lines, each followed by the current indentation.
    fn leading_trivia(&mut self, trivia: &[Comment]) -> fmt::Result {
        if !self.trivia {
            return Ok(());
        }
        for comment in trivia {
            self.comment(comment)?;
            self.out.write_char('\n')?;
            self.write_indent()?;
        }
        Ok(())
    }

    pub fn unit(&mut self, unit: &Unit) -> fmt::Result {
        for member in &unit.members {
            self.write_indent()?;
            self.member(member)?;
            self.out.write_char('\n')?;
        }
        Ok(())
    }

    pub fn member(&mut self, member: &Member) -> fmt::Result {
        self.leading_trivia(&member.trivia)?;
        match &member.kind {
            MemberKind::Class(class) => {
                self.modifiers(&class.modifiers)?;
                write!(self.out, "class {} ", class.name)?;
                if class.members.is_empty() {
                    return self.out.write_str("{}");
                }
                self.out.write_str("{\n")?;
                self.indent += 1;
                for inner in &class.members {
                    self.write_indent()?;
                    self.member(inner)?;
                    self.out.write_char('\n')?;
                }
                self.indent -= 1;
                self.write_indent()?;
                self.out.write_char('}')
            }
            MemberKind::Field(field) => {
                self.modifiers(&field.modifiers)?;
                write!(self.out, "{} {}", field.ty, field.name)?;
                if let Some(init) = &field.init {
                    self.out.write_str(" = ")?;
                    self.expr(init)?;
                }
                self.out.write_char(';')
            }
            MemberKind::Method(method) => {
                self.modifiers(&method.modifiers)?;
                write!(self.out, "{} {}(", method.ret, method.name)?;
                for (i, param) in method.params.iter().enumerate() {
                    if i > 0 {
                        self.out.write_str(", ")?;
                    }
                    write!(self.out, "{} {}", param.ty, param.name)?;
                }
                self.out.write_str(") ")?;
                self.block(&method.body)
            }
        }
    }

    fn modifiers(&mut self, modifiers: &[String]) -> fmt::Result {
        for modifier in modifiers {
            write!(self.out, "{modifier} ")?;
        }
        Ok(())
    }

    pub fn block(&mut self, block: &Block) -> fmt::Result {
        if block.stmts.is_empty() {
            return self.out.write_str("{}");
        }
        self.out.write_str("{\n")?;
        self.indent += 1;
        for stmt in &block.stmts {
            self.write_indent()?;
            self.stmt(stmt)?;
            self.out.write_char('\n')?;
        }
        self.indent -= 1;
        self.write_indent()?;
        self.out.write_char('}')
    }

    pub fn stmt(&mut self, stmt: &Stmt) -> fmt::Result {
        self.leading_trivia(&stmt.trivia)?;
        self.stmt_body(stmt)
    }

    /// A statement nested inline after `if (..)`, `else`, `do` or a loop header.
    fn nested(&mut self, stmt: &Stmt) -> fmt::Result {
        if self.trivia {
            for comment in &stmt.trivia {
                match comment {
                    Comment::Line(text) | Comment::Block(text) => {
                        write!(self.out, "/* {text} */ ")?;
                    }
                }
            }
        }
        self.stmt_body(stmt)
    }

    fn stmt_body(&mut self, stmt: &Stmt) -> fmt::Result {
        match &stmt.kind {
            StmtKind::Block(block) => self.block(block),
            StmtKind::Local(local) => {
                self.local(local)?;
                self.out.write_char(';')
            }
            StmtKind::Expr(expr) => {
                self.expr(expr)?;
                self.out.write_char(';')
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.out.write_str("if (")?;
                self.expr(cond)?;
                self.out.write_str(") ")?;
                self.nested(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.out.write_str(" else ")?;
                    self.nested(else_branch)?;
                }
                Ok(())
            }
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => {
                self.out.write_str("for (")?;
                match init {
                    Some(ForInit::Local(local)) => self.local(local)?,
                    Some(ForInit::Exprs(exprs)) => self.expr_list(exprs)?,
                    None => {}
                }
                self.out.write_char(';')?;
                if let Some(cond) = cond {
                    self.out.write_char(' ')?;
                    self.expr(cond)?;
                }
                self.out.write_char(';')?;
                if !update.is_empty() {
                    self.out.write_char(' ')?;
                    self.expr_list(update)?;
                }
                self.out.write_str(") ")?;
                self.nested(body)
            }
            StmtKind::While { cond, body } => {
                self.out.write_str("while (")?;
                self.expr(cond)?;
                self.out.write_str(") ")?;
                self.nested(body)
            }
            StmtKind::DoWhile { body, cond } => {
                self.out.write_str("do ")?;
                self.nested(body)?;
                self.out.write_str(" while (")?;
                self.expr(cond)?;
                self.out.write_str(");")
            }
            StmtKind::Return(None) => self.out.write_str("return;"),
            StmtKind::Return(Some(value)) => {
                self.out.write_str("return ")?;
                self.expr(value)?;
                self.out.write_char(';')
            }
            StmtKind::Break => self.out.write_str("break;"),
            StmtKind::Continue => self.out.write_str("continue;"),
            StmtKind::Empty => self.out.write_char(';'),
        }
    }

    fn local(&mut self, local: &LocalDecl) -> fmt::Result {
        write!(self.out, "{} {}", local.ty, local.name)?;
        if let Some(init) = &local.init {
            self.out.write_str(" = ")?;
            self.expr(init)?;
        }
        Ok(())
    }

    fn expr_list(&mut self, exprs: &[Expr]) -> fmt::Result {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.expr(expr)?;
        }
        Ok(())
    }

    pub fn expr(&mut self, expr: &Expr) -> fmt::Result {
        match &*expr.kind {
            ExprKind::Literal(literal) => match literal {
                Literal::Int(v) => write!(self.out, "{v}"),
                Literal::Long(v) => write!(self.out, "{v}L"),
                Literal::Double(v) => write!(self.out, "{v:?}"),
                Literal::Bool(v) => write!(self.out, "{v}"),
                Literal::Char(v) => write!(self.out, "{v:?}"),
                Literal::Str(v) => write!(self.out, "{v:?}"),
                Literal::Null => self.out.write_str("null"),
            },
            ExprKind::Ident(name) => self.out.write_str(name),
            ExprKind::Unary { op, operand } => {
                if op.is_postfix() {
                    self.expr(operand)?;
                    self.out.write_str(op.token())
                } else {
                    self.out.write_str(op.token())?;
                    self.expr(operand)
                }
            }
            ExprKind::Binary { op, lhs, rhs } => {
                self.expr(lhs)?;
                write!(self.out, " {op} ")?;
                self.expr(rhs)
            }
            ExprKind::Assign { op, target, value } => {
                self.expr(target)?;
                write!(self.out, " {op} ")?;
                self.expr(value)
            }
            ExprKind::Cast { ty, expr } => {
                write!(self.out, "({ty})")?;
                self.expr(expr)
            }
            ExprKind::Paren(inner) => {
                self.out.write_char('(')?;
                self.expr(inner)?;
                self.out.write_char(')')
            }
            ExprKind::Invoke { callee, args } => {
                self.expr(callee)?;
                self.out.write_char('(')?;
                self.expr_list(args)?;
                self.out.write_char(')')
            }
            ExprKind::Member { target, name } => {
                self.expr(target)?;
                write!(self.out, ".{name}")
            }
            ExprKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                self.expr(cond)?;
                self.out.write_str(" ? ")?;
                self.expr(then_expr)?;
                self.out.write_str(" : ")?;
                self.expr(else_expr)
            }
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).unit(self)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).member(self)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).block(self)
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).stmt(self)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).expr(self)
    }
}
