//! Bramble Eval - tree-walking interpreter for Bramble programs.
//!
//! # Architecture
//!
//! - `Environment`: lexical scope frames shared by closures
//! - `Value`: the closed set of runtime values, with rendering and coercions
//! - `evaluate_binary` / `evaluate_unary`: direct enum-based operator dispatch
//! - `Interpreter`: walks the AST, threading `Flow` for `return`
//! - natives: host functions seeded into the root frame
//! - print handlers: where `print` output goes besides the log

mod environment;
pub mod errors;
pub mod interpreter;
mod natives;
mod operators;
mod print_handler;
pub mod value;

pub use environment::{Environment, Variable};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Flow, Interpreter, InterpreterBuilder, Scopes, DEFAULT_MAX_CALL_DEPTH};
pub use operators::{evaluate_binary, evaluate_unary, values_equal};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use value::{is_truthy, numberify, stringify, Value};
