//! Tree-walking interpreter.
//!
//! Statements evaluate to a [`Flow`]: either a normal value or a `return`
//! travelling outwards to the nearest call boundary. Expressions evaluate to
//! a [`Value`] directly.
//!
//! # Module Structure
//!
//! - `builder`: configuration
//! - `call`: the call protocol and parameter binding
//! - `class`: class declarations and `new`
//! - `control`: `if`, `while` and `for`
//! - `member`: property reads and assignment

mod builder;
mod call;
mod class;
mod control;
mod member;

use std::rc::Rc;

use bramble_ir::ast::{FunctionDecl, ObjectProperty, VarDecl};
use bramble_ir::{Expr, LogicalOp, Program, Stmt};
use bramble_stack::{ensure_sufficient_stack, DepthLimit};
use indexmap::IndexMap;

use crate::environment::{Environment, Variable};
use crate::errors::{infinite_outside_params, return_outside_function, EvalError, EvalResult};
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::print_handler::SharedPrintHandler;
use crate::value::{is_truthy, stringify, FunctionValue, Value};

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};

/// The lexically current frame plus the global frame, which `global`
/// declarations always target.
#[derive(Clone, Debug)]
pub struct Scopes {
    pub current: Environment,
    pub global: Environment,
}

impl Scopes {
    /// Top-level scopes: `current` and `global` are the same frame.
    pub fn new(global: Environment) -> Self {
        Scopes {
            current: global.clone(),
            global,
        }
    }

    /// Fresh root frame with the native surface installed.
    pub fn root() -> Self {
        Scopes::new(Environment::root())
    }

    /// Same global frame, different current frame.
    pub fn with_current(&self, current: Environment) -> Self {
        Scopes {
            current,
            global: self.global.clone(),
        }
    }

    /// A new child frame of the current one.
    pub fn child(&self) -> Self {
        self.with_current(Environment::child(&self.current))
    }
}

/// How a statement finished.
#[derive(Clone, Debug)]
pub enum Flow {
    Normal(Value),
    Return(Value),
}

impl Flow {
    pub fn into_value(self) -> Value {
        match self {
            Flow::Normal(v) | Flow::Return(v) => v,
        }
    }
}

type FlowResult = Result<Flow, EvalError>;

pub struct Interpreter {
    logs: Vec<String>,
    print_handler: SharedPrintHandler,
    depth: DepthLimit,
}

impl Interpreter {
    /// An interpreter that prints to stdout.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Every line printed so far, in order.
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn take_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Run a program and return the value of its last statement.
    ///
    /// A `return` that escapes a nested top-level statement is absorbed and
    /// execution continues; a bare top-level `return` is an error.
    pub fn interpret(&mut self, program: &Program, scopes: &Scopes) -> EvalResult {
        let mut last = Value::None;
        for stmt in &program.body {
            if matches!(stmt, Stmt::Return(_)) {
                return Err(return_outside_function());
            }
            last = self.eval_stmt(stmt, scopes)?.into_value();
        }
        Ok(last)
    }

    /// Run a statement sequence in `scopes`, stopping at the first `return`.
    /// A sequence that never returns yields `none`.
    pub(crate) fn eval_sequence(&mut self, body: &[Stmt], scopes: &Scopes) -> FlowResult {
        for stmt in body {
            if let Flow::Return(value) = self.eval_stmt(stmt, scopes)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal(Value::None))
    }

    /// Run `body` in a fresh child frame.
    fn eval_block(&mut self, body: &[Stmt], scopes: &Scopes) -> FlowResult {
        self.eval_sequence(body, &scopes.child())
    }

    pub fn eval_stmt(&mut self, stmt: &Stmt, scopes: &Scopes) -> FlowResult {
        ensure_sufficient_stack(|| self.eval_stmt_inner(stmt, scopes))
    }

    fn eval_stmt_inner(&mut self, stmt: &Stmt, scopes: &Scopes) -> FlowResult {
        match stmt {
            Stmt::VarDecl(decl) => self.eval_var_decl(decl, scopes).map(Flow::Normal),
            Stmt::Print(exprs) => self.eval_print(exprs, scopes).map(Flow::Normal),
            Stmt::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, scopes)?,
                    None => Value::None,
                };
                Ok(Flow::Return(value))
            }
            Stmt::If(stmt) => self.eval_if(stmt, scopes),
            Stmt::While(stmt) => self.eval_while(stmt, scopes),
            Stmt::For(stmt) => self.eval_for(stmt, scopes),
            Stmt::Block(body) => self.eval_block(body, scopes),
            Stmt::Class(decl) => self.eval_class(decl, scopes).map(Flow::Normal),
            Stmt::Function(decl) => self.eval_function(decl, scopes).map(Flow::Normal),
            Stmt::Expr(expr) => self.eval_expr(expr, scopes).map(Flow::Normal),
        }
    }

    pub fn eval_expr(&mut self, expr: &Expr, scopes: &Scopes) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr, scopes))
    }

    fn eval_expr_inner(&mut self, expr: &Expr, scopes: &Scopes) -> EvalResult {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Str(s) => Ok(Value::string(s.as_str())),
            Expr::Bool(b) => Ok(Value::Boolean(*b)),
            Expr::None => Ok(Value::None),
            Expr::Ident(name) => Ok(scopes.current.lookup(name)?.value),
            Expr::Binary { op, left, right } => {
                let left = self.eval_expr(left, scopes)?;
                let right = self.eval_expr(right, scopes)?;
                evaluate_binary(*op, &left, &right)
            }
            Expr::Logical { op, left, right } => {
                let left = self.eval_expr(left, scopes)?;
                let decided = match op {
                    LogicalOp::Or => is_truthy(&left),
                    LogicalOp::And => !is_truthy(&left),
                };
                if decided {
                    Ok(left)
                } else {
                    self.eval_expr(right, scopes)
                }
            }
            Expr::Unary { op, operand } => {
                let operand = self.eval_expr(operand, scopes)?;
                evaluate_unary(*op, &operand)
            }
            Expr::Assign { target, value } => self.eval_assign(target, value, scopes),
            Expr::Array(items) => {
                let items = items
                    .iter()
                    .map(|item| self.eval_expr(item, scopes))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::array(items))
            }
            Expr::Object(properties) => self.eval_object(properties, scopes),
            Expr::Member {
                object,
                property,
                computed,
            } => self.eval_member(object, property, *computed, scopes),
            Expr::Call { callee, args } => self.eval_call(callee, args, scopes),
            Expr::Do(body) => Ok(self.eval_block(body, scopes)?.into_value()),
            Expr::Infinite(name) => Err(infinite_outside_params(name)),
            Expr::New { class, args } => self.eval_new(class, args, scopes),
            Expr::Function(decl) => self.eval_function(decl, scopes),
        }
    }

    fn eval_var_decl(&mut self, decl: &VarDecl, scopes: &Scopes) -> EvalResult {
        let value = match &decl.value {
            Some(expr) => self.eval_expr(expr, scopes)?,
            None => Value::None,
        };
        let variable = Variable {
            value,
            global: decl.global,
            constant: false,
            scope: decl.scope.clone(),
        };
        let frame = if decl.global {
            &scopes.global
        } else {
            &scopes.current
        };
        frame.declare(&decl.name, variable)
    }

    /// Render every expression, concatenate, log and forward to the handler.
    fn eval_print(&mut self, exprs: &[Expr], scopes: &Scopes) -> EvalResult {
        let mut output = String::new();
        for expr in exprs {
            let value = self.eval_expr(expr, scopes)?;
            output.push_str(&stringify(&value));
        }
        self.print_handler.println(&output);
        let value = Value::Print(Rc::from(output.as_str()));
        self.logs.push(output);
        Ok(value)
    }

    /// A key without a value reads the variable of the same name.
    fn eval_object(&mut self, properties: &[ObjectProperty], scopes: &Scopes) -> EvalResult {
        let mut entries = IndexMap::with_capacity(properties.len());
        for property in properties {
            let value = match &property.value {
                Some(expr) => self.eval_expr(expr, scopes)?,
                None => scopes.current.lookup(&property.key)?.value,
            };
            entries.insert(property.key.clone(), value);
        }
        Ok(Value::object(entries))
    }

    /// Named functions are declared in the current frame; anonymous ones are
    /// plain method values.
    fn eval_function(&mut self, decl: &Rc<FunctionDecl>, scopes: &Scopes) -> EvalResult {
        let function = Rc::new(FunctionValue {
            name: decl.name.clone(),
            params: decl.params.clone(),
            body: Rc::clone(&decl.body),
            env: scopes.current.clone(),
        });
        match &decl.name {
            Some(name) => scopes
                .current
                .declare(name, Variable::local(Value::Function(function))),
            None => Ok(Value::Method(function)),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
