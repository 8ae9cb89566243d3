//! Bramble IR: the data shared by the lexer, parser and interpreter.
//!
//! - Spans for source locations
//! - Tokens and `TokenList` for lexer output
//! - AST nodes (`Stmt`, `Expr`, class declarations) and operators

pub mod ast;
mod span;
mod token;

pub use ast::{BinaryOp, Expr, LogicalOp, Params, Program, Stmt, UnaryOp};
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
