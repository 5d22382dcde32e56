use insta::assert_snapshot;
use reducto_syntax::build::*;
use reducto_syntax::{ForInit, Unit};

use crate::{PassMode, RemovalKind, RemovalPass};

fn sample() -> Unit {
    unit(vec![class(
        "Program",
        vec![
            field("int", "s_1", Some(int(5))).with_comment(line_comment("seed 42")),
            field("long", "__loopvar1", Some(long(0))),
            method(
                "int",
                "Main",
                block(vec![
                    local(
                        "int",
                        "x",
                        Some(cast("int", paren(binary(ident("s_1"), BinaryOp::Add, int(2))))),
                    ),
                    expr_stmt(call("Log", vec![string("x"), ident("x")]))
                        .with_comment(line_comment("trace")),
                    r#if(
                        binary(ident("x"), BinaryOp::Gt, int(3)),
                        block_stmt(vec![expr_stmt(assign(
                            ident("x"),
                            binary(ident("x"), BinaryOp::Mul, int(2)),
                        ))]),
                        Some(expr_stmt(assign(ident("x"), int(0)))),
                    ),
                    r#for(
                        Some(ForInit::Local(local_decl("int", "i", Some(int(0))))),
                        Some(binary(ident("i"), BinaryOp::Lt, int(3))),
                        vec![unary(UnaryOp::PostInc, ident("i"))],
                        block_stmt(vec![expr_stmt(compound(
                            ident("x"),
                            AssignOp::AddAssign,
                            ident("i"),
                        ))]),
                    ),
                    do_while(
                        block_stmt(vec![expr_stmt(unary(UnaryOp::PostDec, ident("x")))]),
                        binary(ident("x"), BinaryOp::Gt, int(100)),
                    ),
                    r#if(
                        binary(ident("__loopvar1"), BinaryOp::Lt, long(10)),
                        block_stmt(vec![expr_stmt(unary(UnaryOp::PostInc, ident("__loopvar1")))]),
                        None,
                    ),
                    block_stmt(vec![]),
                    ret(ident("x")),
                ]),
            )
            .with_comment(block_comment("entry")),
        ],
    )])
}

fn render(tree: &Unit) -> String {
    tree.to_string().trim_end().to_owned()
}

#[test]
fn test_probe_counts_every_kind() {
    let tree = sample();
    let counts = RemovalKind::ALL
        .iter()
        .map(|&kind| format!("{kind}: {}", RemovalPass::new(kind).probe(&tree)))
        .collect::<Vec<_>>()
        .join("\n");

    assert_snapshot!(counts, @r"
    diagnostic-log: 0
    for: 1
    do-while: 1
    if-else: 1
    block: 4
    expression-statement: 6
    field-declaration: 1
    assignment: 3
    invocation: 1
    member-access: 0
    cast: 1
    parenthesized: 1
    binary: 6
    literal: 11
    ");
}

#[test]
fn test_nth_expression_statement_empties_else_branch() {
    let outcome = RemovalPass::new(RemovalKind::ExpressionStatement).apply(&sample(), PassMode::Nth(2));

    assert!(outcome.changed);
    assert_eq!(outcome.candidates, 6);
    assert_snapshot!(render(&outcome.unit), @r#"
    class Program {
        static int s_1 = 5;
        static long __loopvar1 = 0L;
        static int Main() {
            int x = (int)(s_1 + 2);
            Log("x", x);
            if (x > 3) {
                x = x * 2;
            }
            for (int i = 0; i < 3; i++) {
                x += i;
            }
            do {
                x--;
            } while (x > 100);
            if (__loopvar1 < 10L) {
                __loopvar1++;
            }
            {}
            return x;
        }
    }
    "#);
}

#[test]
fn test_block_pass_empties_blocks_and_sweeps_empty_ones() {
    let pass = RemovalPass::new(RemovalKind::Block);
    let outcome = pass.apply(&sample(), PassMode::All);

    assert!(outcome.changed);
    assert_snapshot!(render(&outcome.unit), @r#"
    class Program {
        static int s_1 = 5;
        static long __loopvar1 = 0L;
        static int Main() {
            int x = (int)(s_1 + 2);
            Log("x", x);
            if (x > 3) {} else x = 0;
            for (int i = 0; i < 3; i++) {}
            do {} while (x > 100);
            if (__loopvar1 < 10L) {}
            return x;
        }
    }
    "#);
    assert_eq!(pass.probe(&outcome.unit), 0);
}

#[test]
fn test_block_sweep_happens_even_when_nothing_is_selected() {
    let outcome = RemovalPass::new(RemovalKind::Block).apply(&sample(), PassMode::Nth(99));

    assert!(outcome.changed);
    assert_eq!(outcome.candidates, 4);
    assert!(!render(&outcome.unit).contains("{}"));
}

#[test]
fn test_binary_simplification_is_idempotent() {
    let pass = RemovalPass::new(RemovalKind::Binary);
    let first = pass.apply(&sample(), PassMode::All);
    assert!(first.changed);
    assert_snapshot!(render(&first.unit), @r#"
    class Program {
        static int s_1 = 5;
        static long __loopvar1 = 0L;
        static int Main() {
            int x = (int)(15 + 4);
            Log("x", x);
            if (15 > 4) {
                x = 15 * 4;
            } else x = 0;
            for (int i = 0; 15 < 4; i++) {
                x += i;
            }
            do {
                x--;
            } while (15 > 4);
            if (15 < 4) {
                __loopvar1++;
            }
            {}
            return x;
        }
    }
    "#);

    let second = pass.apply(&first.unit, PassMode::All);
    assert!(!second.changed);
    assert_eq!(second.candidates, 0);
    assert_eq!(render(&second.unit), render(&first.unit));
}

#[test]
fn test_cast_and_parenthesized_unwrap() {
    let tree = unit(vec![method(
        "long",
        "M",
        block(vec![ret(cast("long", paren(cast("int", paren(paren(ident("y")))))))]),
    )]);

    let casts = RemovalPass::new(RemovalKind::Cast);
    assert_eq!(casts.probe(&tree), 2);
    let first = casts.apply(&tree, PassMode::Nth(0));
    assert_eq!(first.unit.members[0].to_string(), "static long M() {\n    return (int)((y));\n}");
    let all = casts.apply(&tree, PassMode::All);
    assert_eq!(all.unit.members[0].to_string(), "static long M() {\n    return (y);\n}");

    let parens = RemovalPass::new(RemovalKind::Parenthesized);
    assert_eq!(parens.probe(&tree), 3);
    let all = parens.apply(&tree, PassMode::All);
    assert_eq!(all.unit.members[0].to_string(), "static long M() {\n    return (long)(int)y;\n}");
}

#[test]
fn test_absent_operands_propagate_to_statement() {
    let tree = unit(vec![method(
        "void",
        "M",
        block(vec![
            local("int", "y", Some(int(1))),
            expr_stmt(call("N", vec![int(2), ident("y")])),
            r#while(boolean(true), expr_stmt(call("N", vec![int(4)]))),
            r#if(ident("y"), expr_stmt(assign(ident("y"), int(3))), None),
            ret(binary(int(3), BinaryOp::Add, ident("y"))),
        ]),
    )]);

    let outcome = RemovalPass::new(RemovalKind::Literal).apply(&tree, PassMode::All);
    assert_eq!(outcome.candidates, 6);
    assert_snapshot!(render(&outcome.unit), @r"
    static void M() {
        int y;
        N(y);
        if (y) ;
        return;
    }
    ");
}

#[test]
fn test_protected_nodes_are_never_counted_or_touched() {
    let tree = sample();

    let fields = RemovalPass::new(RemovalKind::FieldDeclaration).apply(&tree, PassMode::All);
    assert_eq!(fields.candidates, 1);
    assert!(render(&fields.unit).contains("static long __loopvar1 = 0L;"));
    assert!(!render(&fields.unit).contains("s_1 = 5"));

    let ifs = RemovalPass::new(RemovalKind::IfElse).apply(&tree, PassMode::All);
    assert_eq!(ifs.candidates, 1);
    assert!(render(&ifs.unit).contains("if (__loopvar1 < 10L)"));
    assert!(!render(&ifs.unit).contains("if (x > 3)"));

    let guarded = unit(vec![method(
        "void",
        "M",
        block(vec![
            expr_stmt(assign(ident("__loopSecretVar2"), int(0))),
            expr_stmt(assign(ident("z"), int(0))),
        ]),
    )]);
    let assignments = RemovalPass::new(RemovalKind::Assignment).apply(&guarded, PassMode::All);
    assert_eq!(assignments.candidates, 1);
    assert_snapshot!(render(&assignments.unit), @r"
    static void M() {
        __loopSecretVar2 = 0;
    }
    ");
}

#[test]
fn test_diagnostic_log_only_runs_in_batch() {
    let tree = sample();
    let pass = RemovalPass::new(RemovalKind::DiagnosticLog);

    let probe = pass.apply(&tree, PassMode::Probe);
    assert_eq!(probe.candidates, 0);
    assert!(!probe.changed);

    let nth = pass.apply(&tree, PassMode::Nth(0));
    assert!(!nth.changed);
    assert!(render(&nth.unit).contains("Log(\"x\", x);"));

    let all = pass.apply(&tree, PassMode::All);
    assert!(all.changed);
    assert_eq!(all.candidates, 1);
    assert!(!render(&all.unit).contains("Log("));
}

#[test]
fn test_custom_options() {
    let options = crate::ReduceOptions {
        protection_markers: vec!["keep".to_owned()],
        diagnostic_prefix: "Trace(".to_owned(),
    };
    let tree = unit(vec![method(
        "void",
        "M",
        block(vec![
            expr_stmt(call("Trace", vec![])),
            expr_stmt(call("Log", vec![])),
            r#if(ident("keep_me"), r#break(), None),
        ]),
    )]);

    let logs = RemovalPass::new(RemovalKind::DiagnosticLog)
        .with_options(options.clone())
        .apply(&tree, PassMode::All);
    assert_eq!(logs.candidates, 1);
    assert!(render(&logs.unit).contains("Log();"));

    let ifs = RemovalPass::new(RemovalKind::IfElse).with_options(options);
    assert_eq!(ifs.probe(&tree), 0);
}

#[test]
fn test_removal_kind_names() {
    assert_eq!(RemovalKind::FieldDeclaration.to_string(), "field-declaration");
    assert_eq!("do-while".parse::<RemovalKind>(), Ok(RemovalKind::DoWhile));
    let err = "statement".parse::<RemovalKind>().unwrap_err();
    assert_eq!(err.to_string(), "unknown removal kind: statement");
    assert_eq!(
        serde_json::to_string(&RemovalKind::MemberAccess).unwrap(),
        "\"member-access\""
    );
}
