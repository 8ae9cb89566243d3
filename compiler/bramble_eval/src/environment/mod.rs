//! Lexical scope frames.
//!
//! An `Environment` is a cheap-to-clone handle to one frame. Closures keep
//! the handle of the frame they were created in, so a write through any
//! holder is seen by all of them.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::errors::{already_declared, constant_assignment, undefined_variable, EvalError};
use crate::natives;
use crate::value::Value;

/// A declared name.
#[derive(Clone, Debug, Default)]
pub struct Variable {
    pub value: Value,
    /// Declared with `global`, or seeded into the root frame.
    pub global: bool,
    /// Cannot be reassigned (`this`).
    pub constant: bool,
    /// Tag from `var : tag name`.
    pub scope: Option<String>,
}

impl Variable {
    /// An ordinary mutable binding.
    pub fn local(value: Value) -> Self {
        Variable {
            value,
            ..Variable::default()
        }
    }

    pub fn global(value: Value) -> Self {
        Variable {
            value,
            global: true,
            ..Variable::default()
        }
    }

    pub fn constant(value: Value) -> Self {
        Variable {
            value,
            constant: true,
            ..Variable::default()
        }
    }
}

struct Frame {
    variables: FxHashMap<String, Variable>,
    parent: Option<Environment>,
}

#[derive(Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Environment {
    /// A parentless frame with nothing declared.
    pub fn new() -> Self {
        Environment::with_parent(None)
    }

    /// The global frame: parentless and seeded with the native surface.
    pub fn root() -> Self {
        let env = Environment::new();
        natives::install(&env);
        env
    }

    /// A nested frame whose lookups fall back to `parent`.
    pub fn child(parent: &Environment) -> Self {
        Environment::with_parent(Some(parent.clone()))
    }

    fn with_parent(parent: Option<Environment>) -> Self {
        Environment(Rc::new(RefCell::new(Frame {
            variables: FxHashMap::default(),
            parent,
        })))
    }

    pub fn parent(&self) -> Option<Environment> {
        self.0.borrow().parent.clone()
    }

    /// Whether both handles point at the same frame.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Whether `name` is declared in this frame, ignoring parents.
    pub fn declares(&self, name: &str) -> bool {
        self.0.borrow().variables.contains_key(name)
    }

    /// The nearest frame declaring `name`.
    pub fn resolve(&self, name: &str) -> Option<Environment> {
        let mut env = self.clone();
        loop {
            if env.declares(name) {
                return Some(env);
            }
            let parent = env.parent()?;
            env = parent;
        }
    }

    pub fn try_lookup(&self, name: &str) -> Option<Variable> {
        let env = self.resolve(name)?;
        let frame = env.0.borrow();
        frame.variables.get(name).cloned()
    }

    pub fn lookup(&self, name: &str) -> Result<Variable, EvalError> {
        self.try_lookup(name).ok_or_else(|| undefined_variable(name))
    }

    /// Declare `name` in this frame. Shadowing a parent's binding is fine;
    /// declaring the same name twice in one frame is not.
    pub fn declare(&self, name: &str, variable: Variable) -> Result<Value, EvalError> {
        let mut frame = self.0.borrow_mut();
        if frame.variables.contains_key(name) {
            return Err(already_declared(name));
        }
        let value = variable.value.clone();
        frame.variables.insert(name.to_string(), variable);
        Ok(value)
    }

    /// Insert or replace `name` in this frame without checks.
    pub(crate) fn define(&self, name: &str, variable: Variable) {
        self.0.borrow_mut().variables.insert(name.to_string(), variable);
    }

    /// Overwrite the nearest binding of `name`.
    ///
    /// A name that is not declared anywhere in the chain is declared in this
    /// frame instead of failing.
    pub fn assign(&self, name: &str, value: Value) -> Result<Value, EvalError> {
        let Some(env) = self.resolve(name) else {
            self.define(name, Variable::local(value.clone()));
            return Ok(value);
        };
        let mut frame = env.0.borrow_mut();
        match frame.variables.get_mut(name) {
            Some(variable) if variable.constant => Err(constant_assignment(name)),
            Some(variable) => {
                variable.value = value.clone();
                Ok(value)
            }
            None => Err(undefined_variable(name)),
        }
    }

    /// Overwrite the nearest binding of `name`, constant or not. Returns
    /// whether a binding was found.
    pub fn set_value(&self, name: &str, value: Value) -> bool {
        let Some(env) = self.resolve(name) else {
            return false;
        };
        let mut frame = env.0.borrow_mut();
        match frame.variables.get_mut(name) {
            Some(variable) => {
                variable.value = value;
                true
            }
            None => false,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

// Frames are reachable from values they hold, so only the shape is shown.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(frame) = self.0.try_borrow() else {
            return f.write_str("Environment { <borrowed> }");
        };
        f.debug_struct("Environment")
            .field("variables", &frame.variables.len())
            .field("has_parent", &frame.parent.is_some())
            .finish()
    }
}
