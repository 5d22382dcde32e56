use insta::assert_snapshot;

use crate::build::*;
use crate::{ForInit, NodeRef, Stmt, SyntaxKind, Unit};

fn sample() -> Unit {
    unit(vec![class(
        "Program",
        vec![
            field("int", "s_1", Some(int(5))),
            method(
                "int",
                "Main",
                block(vec![
                    local("int", "__loopvar0", Some(int(0))),
                    r#for(
                        Some(ForInit::Local(local_decl("int", "i", Some(int(0))))),
                        Some(binary(ident("i"), BinaryOp::Lt, int(10))),
                        vec![unary(UnaryOp::PostInc, ident("i"))],
                        block_stmt(vec![expr_stmt(compound(
                            ident("s_1"),
                            AssignOp::AddAssign,
                            cast("int", paren(binary(ident("i"), BinaryOp::Mul, int(2)))),
                        ))]),
                    ),
                    r#if(
                        binary(ident("s_1"), BinaryOp::Gt, int(3)),
                        expr_stmt(call("Log", vec![string("s_1"), ident("s_1")])),
                        Some(expr_stmt(assign(ident("s_1"), int(0)))),
                    ),
                    ret(ident("s_1")),
                ]),
            )
            .with_comment(line_comment("entry point")),
        ],
    )])
}

#[test]
fn test_render_unit() {
    assert_snapshot!(sample().to_string().trim_end(), @r#"
    class Program {
        static int s_1 = 5;
        // entry point
        static int Main() {
            int __loopvar0 = 0;
            for (int i = 0; i < 10; i++) {
                s_1 += (int)(i * 2);
            }
            if (s_1 > 3) Log("s_1", s_1); else s_1 = 0;
            return s_1;
        }
    }
    "#);
}

#[test]
fn test_render_loops_and_literals() {
    let body = block(vec![
        do_while(
            block_stmt(vec![expr_stmt(unary(UnaryOp::PreDec, ident("x")))]),
            binary(ident("x"), BinaryOp::Ne, long(0)),
        ),
        r#while(boolean(false), Stmt::empty()),
        r#for(None, None, Vec::new(), r#break()),
        expr_stmt(assign(
            member(ident("s"), "f"),
            conditional(boolean(true), double(1.5), string("a\"b")),
        )),
        ret_void(),
    ]);
    assert_snapshot!(body.to_string(), @r#"
    {
        do {
            --x;
        } while (x != 0L);
        while (false) ;
        for (;;) break;
        s.f = true ? 1.5 : "a\"b";
        return;
    }
    "#);
}

#[test]
fn test_text_omits_trivia() {
    let stmt = expr_stmt(call("M", vec![]))
        .with_comment(line_comment("__loopvar mention"))
        .with_comment(block_comment("second"));

    assert_eq!(stmt.to_string(), "// __loopvar mention\n/* second */\nM();");
    assert_eq!(NodeRef::Stmt(&stmt).text(), "M();");
}

#[test]
fn test_nested_trivia_is_rendered_inline() {
    let stmt = r#if(
        ident("c"),
        expr_stmt(call("M", vec![])).with_comment(line_comment("then")),
        None,
    );
    assert_eq!(stmt.to_string(), "if (c) /* then */ M();");
    assert_eq!(NodeRef::Stmt(&stmt).text(), "if (c) M();");
}

#[test]
fn test_count_and_comments() {
    let tree = sample();
    assert_eq!(tree.count(SyntaxKind::BinaryExpression), 3);
    assert_eq!(tree.count(SyntaxKind::AssignmentExpression), 2);
    assert_eq!(tree.count(SyntaxKind::InvocationExpression), 1);
    assert_eq!(tree.count(SyntaxKind::LiteralExpression), 8);
    assert_eq!(tree.count(SyntaxKind::FieldDeclaration), 1);
    assert!(tree.contains_comments());

    let mut stripped = tree.clone();
    if let crate::MemberKind::Class(class) = &mut stripped.members[0].kind {
        for member in &mut class.members {
            member.trivia.clear();
        }
    }
    assert!(!stripped.contains_comments());
}

#[test]
fn test_syntax_kind_categories() {
    assert!(SyntaxKind::DoWhile.is_statement());
    assert!(!SyntaxKind::DoWhile.is_expression());
    assert!(SyntaxKind::CastExpression.is_expression());
    assert!(!SyntaxKind::FieldDeclaration.is_statement());
    assert_eq!(SyntaxKind::If.to_string(), "If");
}

#[test]
fn test_tree_survives_json_interchange() {
    let tree = sample();
    let json = serde_json::to_string(&tree).expect("serialize");
    let back: Unit = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, tree);
    assert_eq!(back.to_string(), tree.to_string());
}
