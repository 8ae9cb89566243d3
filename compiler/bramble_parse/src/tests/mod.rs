//! Parser tests.
//!
//! - `expr`: precedence, literals, postfix chains
//! - `stmt`: declarations, control flow, functions
//! - `class`: class bodies and their errors

#![allow(clippy::unwrap_used)]

mod stmt;

use crate::{parse, ParseError};
use bramble_ir::{Expr, Program, Stmt};

fn parse_source(source: &str) -> Result<Program, ParseError> {
    let tokens = bramble_lexer::lex(source).unwrap();
    parse(&tokens)
}

fn parse_ok(source: &str) -> Vec<Stmt> {
    parse_source(source).unwrap().body
}

/// The single expression statement of `source`.
fn parse_expr(source: &str) -> Expr {
    let mut body = parse_ok(source);
    assert_eq!(body.len(), 1, "expected one statement in {source:?}");
    match body.remove(0) {
        Stmt::Expr(expr) => expr,
        other => panic!("expected expression statement, got {other:?}"),
    }
}
