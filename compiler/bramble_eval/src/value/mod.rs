//! Runtime values.
//!
//! `Value` is a closed sum type; every consumer matches it exhaustively.
//! Arrays and objects are shared mutable containers, so a write through one
//! holder is visible through every other holder of the same container.
//! Function-like values close over the `Environment` they were created in.

mod class;
mod render;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use bramble_ir::ast::Stmt;
use bramble_ir::Params;
use indexmap::IndexMap;

use crate::environment::Environment;
use crate::errors::EvalResult;
use crate::interpreter::Interpreter;

pub use class::{
    ClassMemberValue, ClassMethodValue, ClassValue, ClassVariableValue, InstanceBinding,
};
pub use render::{is_truthy, numberify, parse_number, render_number, stringify};

/// Shared, mutable array storage.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// Shared, mutable, insertion-ordered object storage.
pub type ObjectRef = Rc<RefCell<IndexMap<String, Value>>>;

/// Signature of a host function exposed to scripts.
pub type NativeFn = fn(&Interpreter, &[Value]) -> EvalResult;

/// A host function together with the name it reports in errors.
#[derive(Clone, Copy)]
pub struct NativeMethod {
    pub name: &'static str,
    pub func: NativeFn,
}

impl fmt::Debug for NativeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeMethod")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A user function: named declarations become `Value::Function`,
/// anonymous literals become `Value::Method`.
#[derive(Debug)]
pub struct FunctionValue {
    pub name: Option<String>,
    pub params: Params,
    pub body: Rc<[Stmt]>,
    pub env: Environment,
}

impl FunctionValue {
    /// Name used in arity errors.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("method")
    }
}

/// A class constructor; it runs in a frame parented at the class environment.
#[derive(Debug)]
pub struct ConstructorValue {
    pub params: Params,
    pub body: Rc<[Stmt]>,
    pub env: Environment,
}

#[derive(Clone, Default)]
pub enum Value {
    #[default]
    None,
    Number(f64),
    String(Rc<str>),
    Boolean(bool),
    Array(ArrayRef),
    Object(ObjectRef),
    /// Text produced by a `print` statement.
    Print(Rc<str>),
    NativeMethod(NativeMethod),
    Function(Rc<FunctionValue>),
    Method(Rc<FunctionValue>),
    Constructor(Rc<ConstructorValue>),
    ClassMethod(Rc<ClassMethodValue>),
    ClassVariable(Rc<ClassVariableValue>),
    Class(Rc<ClassValue>),
}

impl Value {
    pub fn string(text: impl Into<Rc<str>>) -> Value {
        Value::String(text.into())
    }

    pub fn array(items: Vec<Value>) -> Value {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn object(entries: IndexMap<String, Value>) -> Value {
        Value::Object(Rc::new(RefCell::new(entries)))
    }

    pub fn native(name: &'static str, func: NativeFn) -> Value {
        Value::NativeMethod(NativeMethod { name, func })
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Print(_) => "print",
            Value::NativeMethod(_) => "native method",
            Value::Function(_) => "function",
            Value::Method(_) => "method",
            Value::Constructor(_) => "constructor",
            Value::ClassMethod(_) => "class method",
            Value::ClassVariable(_) => "class variable",
            Value::Class(_) => "class",
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

// Rendered rather than derived: containers may reference themselves.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_name(), stringify(self))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&stringify(self))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}
