//! Tree AST for Bramble programs.
//!
//! Nodes are built once by the parser and never mutated. Bodies that runtime
//! values need to keep alive (functions, methods, constructors) are held in
//! `Rc<[Stmt]>` so a closure shares its body instead of cloning it.
//!
//! # Module Structure
//!
//! - `expr`: expressions and function literals
//! - `stmt`: statements, loops and class declarations
//! - `operators`: binary, unary and logical operators

mod expr;
mod operators;
mod stmt;

pub use expr::{Expr, FunctionDecl, ObjectProperty, Params};
pub use operators::{BinaryOp, LogicalOp, UnaryOp};
pub use stmt::{
    ClassDecl, ClassField, ClassMember, ClassMethod, ConstructorDecl, ForStmt, IfStmt,
    LoopCounter, Stmt, VarDecl, WhileStmt,
};

/// A parsed source file: its top-level statements in order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    pub fn new(body: Vec<Stmt>) -> Self {
        Program { body }
    }
}

#[cfg(test)]
mod tests;
