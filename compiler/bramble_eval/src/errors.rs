//! Runtime errors raised by the interpreter.
//!
//! `EvalErrorKind` carries the structured category; the factory functions
//! below are the public way to build an `EvalError`, and every one of them
//! fills `message` from the kind's `Display` impl.

use std::fmt;

use bramble_stack::DepthExceeded;

use crate::value::Value;

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Scope
    UndefinedVariable {
        name: String,
    },
    AlreadyDeclared {
        name: String,
    },
    ConstantAssignment {
        name: String,
    },

    // Operators
    TypeMismatch {
        expected: String,
        got: String,
    },
    DivisionByZero,

    // Calls
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
        at_least: bool,
    },
    NotCallable {
        value: String,
    },
    UninitializedMethod {
        name: String,
    },
    RecursionLimit {
        limit: usize,
    },

    // Access
    MissingMember {
        key: String,
    },
    IndexOutOfBounds {
        index: String,
    },
    NotAClass {
        name: String,
        got: &'static str,
    },
    InvalidAssignmentTarget,

    // Placement
    ReturnOutsideFunction,
    InfiniteOutsideParams {
        name: String,
    },

    // Host
    NativeError {
        name: &'static str,
        message: String,
    },
    Io {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedVariable { name } => write!(f, "undefined variable `{name}`"),
            Self::AlreadyDeclared { name } => {
                write!(f, "variable `{name}` is already declared in this scope")
            }
            Self::ConstantAssignment { name } => write!(f, "cannot assign to constant `{name}`"),

            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::DivisionByZero => write!(f, "division by zero"),

            Self::ArityMismatch {
                name,
                expected,
                got,
                at_least,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                let bound = if *at_least { "at least " } else { "" };
                write!(f, "{name} expects {bound}{expected} {arg_word}, got {got}")
            }
            Self::NotCallable { value } => write!(f, "`{value}` is not callable"),
            Self::UninitializedMethod { name } => {
                write!(f, "class method `{name}` is not bound to an instance")
            }
            Self::RecursionLimit { limit } => {
                write!(f, "maximum call depth of {limit} exceeded")
            }

            Self::MissingMember { key } => write!(f, "object key `{key}` does not exist"),
            Self::IndexOutOfBounds { index } => write!(f, "array index {index} does not exist"),
            Self::NotAClass { name, got } => {
                write!(f, "`{name}` is not a class, found {got}")
            }
            Self::InvalidAssignmentTarget => {
                write!(f, "can only assign to an identifier or a property access")
            }

            Self::ReturnOutsideFunction => {
                write!(f, "a return statement can only be used inside a function")
            }
            Self::InfiniteOutsideParams { name } => {
                write!(f, "`...{name}` can only appear in a parameter list")
            }

            Self::NativeError { name, message } => write!(f, "{name}: {message}"),
            Self::Io { message } => write!(f, "io error: {message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; always `kind.to_string()`.
    pub message: String,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError { kind, message }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

impl From<DepthExceeded> for EvalError {
    fn from(err: DepthExceeded) -> Self {
        recursion_limit(err.limit)
    }
}

// Scope

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn already_declared(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AlreadyDeclared {
        name: name.to_string(),
    })
}

#[cold]
pub fn constant_assignment(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstantAssignment {
        name: name.to_string(),
    })
}

// Operators

#[cold]
pub fn type_mismatch(expected: impl Into<String>, got: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.into(),
        got: got.into(),
    })
}

/// Both operands of `op` had to be numbers.
#[cold]
pub fn binary_type_mismatch(op: &str, left: &Value, right: &Value) -> EvalError {
    type_mismatch(
        format!("numbers for `{op}`"),
        format!("{} and {}", left.type_name(), right.type_name()),
    )
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

// Calls

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
        at_least: false,
    })
}

/// Fewer arguments than the minimum a callee accepts.
#[cold]
pub fn too_few_arguments(name: &str, minimum: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected: minimum,
        got,
        at_least: true,
    })
}

#[cold]
pub fn not_callable(rendered: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        value: rendered.into(),
    })
}

#[cold]
pub fn uninitialized_method(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UninitializedMethod {
        name: name.to_string(),
    })
}

#[cold]
pub fn recursion_limit(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { limit })
}

// Access

#[cold]
pub fn missing_member(key: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingMember {
        key: key.to_string(),
    })
}

#[cold]
pub fn index_out_of_bounds(index: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds {
        index: index.into(),
    })
}

#[cold]
pub fn not_a_class(name: &str, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAClass {
        name: name.to_string(),
        got: got.type_name(),
    })
}

#[cold]
pub fn invalid_assignment_target() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidAssignmentTarget)
}

// Placement

#[cold]
pub fn return_outside_function() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReturnOutsideFunction)
}

#[cold]
pub fn infinite_outside_params(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InfiniteOutsideParams {
        name: name.to_string(),
    })
}

// Host

#[cold]
pub fn native_error(name: &'static str, message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NativeError {
        name,
        message: message.into(),
    })
}

#[cold]
pub fn io_error(err: &std::io::Error) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Io {
        message: err.to_string(),
    })
}
