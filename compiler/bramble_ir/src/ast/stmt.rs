//! Statement nodes.

use std::rc::Rc;

use super::{Expr, FunctionDecl, Params};

/// `var`/`local`/`global` declaration.
///
/// `global` marks the binding as global; `scope` is the tag written as
/// `var: tag name`. `local` and `var` are otherwise identical.
#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub global: bool,
    pub value: Option<Expr>,
    pub scope: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Vec<Stmt>,
    /// Either a `Stmt::Block`, a chained `Stmt::If`, or a single statement.
    pub else_branch: Option<Box<Stmt>>,
}

/// Counter declared in a `while (cond; var i = N)` header.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopCounter {
    pub name: String,
    pub start: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub counter: Option<LoopCounter>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ForStmt {
    pub init: Box<Stmt>,
    pub condition: Expr,
    pub update: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConstructorDecl {
    pub params: Params,
    pub body: Rc<[Stmt]>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassMethod {
    pub name: String,
    pub params: Params,
    pub body: Rc<[Stmt]>,
    pub is_static: bool,
    pub is_private: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassField {
    pub name: String,
    pub is_private: bool,
    pub is_readonly: bool,
    /// Default value; the parser never produces one, fields are set in the
    /// constructor.
    pub value: Option<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClassMember {
    Method(ClassMethod),
    Field(ClassField),
}

impl ClassMember {
    pub fn name(&self) -> &str {
        match self {
            ClassMember::Method(m) => &m.name,
            ClassMember::Field(f) => &f.name,
        }
    }

    pub fn is_private(&self) -> bool {
        match self {
            ClassMember::Method(m) => m.is_private,
            ClassMember::Field(f) => f.is_private,
        }
    }
}

/// `class Name { ... }`, members kept in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub constructor: Option<ConstructorDecl>,
    pub public: Vec<ClassMember>,
    pub private: Vec<ClassMember>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    VarDecl(VarDecl),
    Print(Vec<Expr>),
    Return(Option<Expr>),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Block(Vec<Stmt>),
    Class(ClassDecl),
    Function(Rc<FunctionDecl>),
    Expr(Expr),
}
