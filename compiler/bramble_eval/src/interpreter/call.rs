//! The call protocol.
//!
//! Arguments are evaluated left to right in the caller's scope, then the
//! callee. User-level callees bind their parameters in a new frame whose
//! parent is the frame they were defined in.

use std::rc::Rc;

use bramble_ir::ast::Stmt;
use bramble_ir::{Expr, Params};
use tracing::trace;

use super::{Interpreter, Scopes};
use crate::environment::{Environment, Variable};
use crate::errors::{
    not_callable, too_few_arguments, uninitialized_method, EvalError, EvalResult,
};
use crate::value::{stringify, Value};

/// Everything needed to run one user-level body.
pub(super) struct Invocation<'a> {
    pub name: &'a str,
    pub params: &'a Params,
    pub body: &'a Rc<[Stmt]>,
    pub env: &'a Environment,
    /// Bound as a constant `this` before the parameters.
    pub this: Option<Value>,
}

impl Interpreter {
    pub(super) fn eval_call(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        scopes: &Scopes,
    ) -> EvalResult {
        let args = args
            .iter()
            .map(|arg| self.eval_expr(arg, scopes))
            .collect::<Result<Vec<_>, _>>()?;
        let callee = self.eval_expr(callee, scopes)?;
        self.call_value(&callee, args)
    }

    /// Call an already evaluated value.
    #[tracing::instrument(level = "debug", skip_all, fields(callee = callee.type_name()))]
    pub fn call_value(&mut self, callee: &Value, args: Vec<Value>) -> EvalResult {
        match callee {
            Value::NativeMethod(native) => {
                trace!(name = native.name, "native call");
                (native.func)(self, &args)
            }
            Value::Function(function) | Value::Method(function) => self.invoke(
                Invocation {
                    name: function.label(),
                    params: &function.params,
                    body: &function.body,
                    env: &function.env,
                    this: None,
                },
                args,
            ),
            Value::ClassMethod(method) => {
                let this = if method.is_static {
                    None
                } else {
                    let binding = method
                        .binding
                        .as_ref()
                        .ok_or_else(|| uninitialized_method(&method.name))?;
                    Some(Value::Object(binding.build_self(false)))
                };
                self.invoke(
                    Invocation {
                        name: &method.name,
                        params: &method.params,
                        body: &method.body,
                        env: &method.env,
                        this,
                    },
                    args,
                )
            }
            other => Err(not_callable(stringify(other))),
        }
    }

    /// Bind `this` and the parameters in a fresh frame, then run the body.
    /// Guarded by the call-depth limit.
    pub(super) fn invoke(&mut self, call: Invocation<'_>, args: Vec<Value>) -> EvalResult {
        self.depth.enter()?;
        let result = self.invoke_unguarded(call, args);
        self.depth.exit();
        result
    }

    fn invoke_unguarded(&mut self, call: Invocation<'_>, args: Vec<Value>) -> EvalResult {
        let frame = Environment::child(call.env);
        if let Some(this) = call.this {
            frame.declare("this", Variable::constant(this))?;
        }
        bind_params(&frame, call.name, call.params, args)?;

        // `global` declarations inside the body still reach the root frame
        let scopes = Scopes::new(root_of(call.env)).with_current(frame);
        Ok(self.eval_sequence(call.body, &scopes)?.into_value())
    }
}

/// Bind positional arguments. Arguments past the named parameters go into
/// the variadic array when there is one and are dropped otherwise.
fn bind_params(
    frame: &Environment,
    name: &str,
    params: &Params,
    args: Vec<Value>,
) -> Result<(), EvalError> {
    if args.len() < params.min_arity() {
        return Err(too_few_arguments(name, params.min_arity(), args.len()));
    }
    let mut args = args.into_iter();
    for param in &params.names {
        // Length checked above
        let value = args.next().unwrap_or_default();
        frame.declare(param, Variable::local(value))?;
    }
    if let Some(rest) = &params.variadic {
        frame.declare(rest, Variable::local(Value::array(args.collect())))?;
    }
    Ok(())
}

/// The parentless frame at the top of `env`'s chain.
fn root_of(env: &Environment) -> Environment {
    let mut env = env.clone();
    while let Some(parent) = env.parent() {
        env = parent;
    }
    env
}
