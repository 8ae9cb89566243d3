//! Expression nodes.

use std::fmt;
use std::rc::Rc;

use super::{BinaryOp, LogicalOp, Stmt, UnaryOp};

/// Parameter list of a function, method or constructor.
///
/// `variadic` is the name after a trailing `...`; it collects every argument
/// from position `names.len()` onwards.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Params {
    pub names: Vec<String>,
    pub variadic: Option<String>,
}

impl Params {
    pub fn new(names: Vec<String>, variadic: Option<String>) -> Self {
        Params { names, variadic }
    }

    /// Number of arguments a call must supply.
    #[inline]
    pub fn min_arity(&self) -> usize {
        self.names.len()
    }
}

/// Renders `a,b,...` the way signatures are shown in stringified values.
impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for name in &self.names {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(name)?;
            first = false;
        }
        if self.variadic.is_some() {
            if !first {
                f.write_str(",")?;
            }
            f.write_str("...")?;
        }
        Ok(())
    }
}

/// A `function` declaration or literal.
///
/// A named function declares itself in the enclosing scope when evaluated;
/// an anonymous one is just a value.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub name: Option<String>,
    pub params: Params,
    pub body: Rc<[Stmt]>,
}

/// One `key` or `key: value` entry of an object literal.
///
/// A missing value is shorthand for the variable named `key`.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectProperty {
    pub key: String,
    pub value: Option<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Str(String),
    Bool(bool),
    None,
    Ident(String),

    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// `target = value`, where target is an identifier or member chain.
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },

    Array(Vec<Expr>),
    Object(Vec<ObjectProperty>),

    /// `object.property` (not computed) or `object[property]` (computed).
    Member {
        object: Box<Expr>,
        property: Box<Expr>,
        computed: bool,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },

    /// `do { ... }`, a block whose `return` becomes the expression's value.
    Do(Vec<Stmt>),
    /// `...name`, only meaningful inside a parameter list.
    Infinite(String),
    /// `new Name(args)`
    New {
        class: String,
        args: Vec<Expr>,
    },
    Function(Rc<FunctionDecl>),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Expr {
        Expr::Ident(name.into())
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Expr {
        Expr::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn member(object: Expr, property: Expr, computed: bool) -> Expr {
        Expr::Member {
            object: Box::new(object),
            property: Box::new(property),
            computed,
        }
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
        Expr::Call {
            callee: Box::new(callee),
            args,
        }
    }
}
