use super::*;
use bramble_ir::ast::{ForStmt, IfStmt, LoopCounter, VarDecl, WhileStmt};
use bramble_ir::{BinaryOp, TokenKind};
use crate::ParseErrorKind;
use pretty_assertions::assert_eq;

#[test]
fn test_variable_declarations() {
    let body = parse_ok("var a = 1; local b; global c = 'x' var: outer d = 2");
    assert_eq!(
        body,
        vec![
            Stmt::VarDecl(VarDecl {
                name: "a".into(),
                global: false,
                value: Some(Expr::Number(1.0)),
                scope: None,
            }),
            Stmt::VarDecl(VarDecl {
                name: "b".into(),
                global: false,
                value: None,
                scope: None,
            }),
            Stmt::VarDecl(VarDecl {
                name: "c".into(),
                global: true,
                value: Some(Expr::Str("x".into())),
                scope: None,
            }),
            Stmt::VarDecl(VarDecl {
                name: "d".into(),
                global: false,
                value: Some(Expr::Number(2.0)),
                scope: Some("outer".into()),
            }),
        ]
    );
}

#[test]
fn test_declaration_needs_a_name() {
    let err = parse_source("var = 1").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::UnexpectedToken {
            expected: "identifier",
            found: TokenKind::Eq
        }
    );
}

#[test]
fn test_semicolons_are_optional() {
    assert_eq!(parse_ok("a = 1 b = 2").len(), 2);
    assert_eq!(parse_ok("a = 1; b = 2;").len(), 2);
}

#[test]
fn test_print_list() {
    assert_eq!(
        parse_ok("print 'a', 1 + 1;"),
        vec![Stmt::Print(vec![
            Expr::Str("a".into()),
            Expr::binary(BinaryOp::Add, Expr::Number(1.0), Expr::Number(1.0)),
        ])]
    );
}

#[test]
fn test_return_forms() {
    let body = parse_ok("function f() { return; } function g() { return 1 } function h() { return }");
    for (stmt, expected) in body.iter().zip([None, Some(Expr::Number(1.0)), None]) {
        let Stmt::Function(func) = stmt else {
            panic!("expected function");
        };
        assert_eq!(&func.body[..], &[Stmt::Return(expected)]);
    }
}

#[test]
fn test_function_declaration_params() {
    let body = parse_ok("function sum(a, b, ...rest) { }");
    let Stmt::Function(func) = &body[0] else {
        panic!("expected function");
    };
    assert_eq!(func.name.as_deref(), Some("sum"));
    assert_eq!(func.params.names, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(func.params.variadic.as_deref(), Some("rest"));
    assert_eq!(func.params.min_arity(), 2);
}

#[test]
fn test_invalid_parameter() {
    let err = parse_source("function f(1) { }").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::InvalidParameter {
            found: TokenKind::Number
        }
    );
}

#[test]
fn test_variadic_must_be_last() {
    let err = parse_source("function f(...rest, a) { }").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::UnexpectedToken {
            expected: "`)`",
            found: TokenKind::Comma
        }
    );
}

#[test]
fn test_if_else_chain() {
    let body = parse_ok("if (a) { 1 } else if (b) { 2 } else { 3 }");
    let Stmt::If(IfStmt {
        condition,
        then_branch,
        else_branch: Some(else_branch),
    }) = &body[0]
    else {
        panic!("expected if with else");
    };
    assert_eq!(condition, &Expr::ident("a"));
    assert_eq!(then_branch, &vec![Stmt::Expr(Expr::Number(1.0))]);
    let Stmt::If(nested) = else_branch.as_ref() else {
        panic!("expected chained if");
    };
    assert_eq!(
        nested.else_branch.as_deref(),
        Some(&Stmt::Block(vec![Stmt::Expr(Expr::Number(3.0))]))
    );
}

#[test]
fn test_if_requires_parentheses() {
    let err = parse_source("if a { }").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::UnexpectedToken {
            expected: "`(`",
            found: TokenKind::Ident
        }
    );
}

#[test]
fn test_while_with_counter() {
    let body = parse_ok("while (i < 3; var i = 5) { }");
    assert_eq!(
        body,
        vec![Stmt::While(WhileStmt {
            condition: Expr::binary(BinaryOp::Lt, Expr::ident("i"), Expr::Number(3.0)),
            counter: Some(LoopCounter {
                name: "i".into(),
                start: 5.0,
            }),
            body: vec![],
        })]
    );
}

#[test]
fn test_while_counter_defaults_to_zero() {
    let body = parse_ok("while (true; local n) { }");
    let Stmt::While(stmt) = &body[0] else {
        panic!("expected while");
    };
    assert_eq!(
        stmt.counter,
        Some(LoopCounter {
            name: "n".into(),
            start: 0.0,
        })
    );
}

#[test]
fn test_while_counter_must_be_number_literal() {
    let err = parse_source("while (true; var i = 'a') { }").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidWhileCounter);
}

#[test]
fn test_while_counter_must_be_local() {
    let err = parse_source("while (true; global i) { }").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::UnexpectedToken {
            expected: "`var` or `local` loop counter",
            found: TokenKind::Global
        }
    );
}

#[test]
fn test_for_loop() {
    let body = parse_ok("for (var i; i < 3; i = i + 1) { print i }");
    let Stmt::For(ForStmt {
        init,
        condition,
        update,
        body,
    }) = &body[0]
    else {
        panic!("expected for");
    };
    assert_eq!(
        init.as_ref(),
        &Stmt::VarDecl(VarDecl {
            name: "i".into(),
            global: false,
            value: Some(Expr::Number(0.0)),
            scope: None,
        })
    );
    assert_eq!(
        condition,
        &Expr::binary(BinaryOp::Lt, Expr::ident("i"), Expr::Number(3.0))
    );
    assert!(matches!(update, Expr::Assign { .. }));
    assert_eq!(body, &vec![Stmt::Print(vec![Expr::ident("i")])]);
}

#[test]
fn test_for_loop_missing_condition() {
    let err = parse_source("for (var i = 0; ; i = i + 1) { }").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::UnexpectedToken {
            expected: "a for loop condition",
            found: TokenKind::Semicolon
        }
    );
}

#[test]
fn test_block_statement() {
    assert_eq!(
        parse_ok("{ var a = 1 }"),
        vec![Stmt::Block(vec![Stmt::VarDecl(VarDecl {
            name: "a".into(),
            global: false,
            value: Some(Expr::Number(1.0)),
            scope: None,
        })])]
    );
}

#[test]
fn test_unclosed_block() {
    let err = parse_source("{ var a = 1").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::UnexpectedToken {
            expected: "`}`",
            found: TokenKind::Eof
        }
    );
}

#[test]
fn test_error_display_names_tokens() {
    let err = parse_source("print )").unwrap_err();
    assert_eq!(err.to_string(), "expected an expression, found `)` at 6..7");
}
