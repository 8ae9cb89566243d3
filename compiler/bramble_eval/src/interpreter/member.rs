//! Property reads and assignment.

use bramble_ir::Expr;

use super::{Interpreter, Scopes};
use crate::errors::{
    index_out_of_bounds, invalid_assignment_target, missing_member, type_mismatch, EvalError,
    EvalResult,
};
use crate::value::{parse_number, render_number, stringify, ArrayRef, ObjectRef, Value};

/// A container reached while walking an assignment chain.
enum Container {
    Array(ArrayRef),
    Object(ObjectRef),
}

impl Container {
    fn of(value: &Value) -> Option<Container> {
        match value {
            Value::Array(items) => Some(Container::Array(items.clone())),
            Value::Object(entries) => Some(Container::Object(entries.clone())),
            _ => None,
        }
    }

    fn get(&self, key: &str) -> Result<Option<Value>, EvalError> {
        match self {
            Container::Object(entries) => Ok(entries.borrow().get(key).cloned()),
            Container::Array(items) => {
                let index = array_key(key)?;
                Ok(items.borrow().get(index).cloned())
            }
        }
    }

    /// Overwrite `key`, or create it. Arrays accept an index equal to their
    /// length, which appends.
    fn set(&self, key: &str, value: Value) -> Result<(), EvalError> {
        match self {
            Container::Object(entries) => {
                entries.borrow_mut().insert(key.to_string(), value);
                Ok(())
            }
            Container::Array(items) => {
                let index = array_key(key)?;
                let mut items = items.borrow_mut();
                if index < items.len() {
                    items[index] = value;
                } else if index == items.len() {
                    items.push(value);
                } else {
                    return Err(index_out_of_bounds(key));
                }
                Ok(())
            }
        }
    }
}

/// A non-negative whole number, as an index.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "checked non-negative, whole and within f64's exact range"
)]
fn to_index(n: f64) -> Option<usize> {
    if n >= 0.0 && n.fract() == 0.0 && n <= 9_007_199_254_740_991.0 {
        Some(n as usize)
    } else {
        None
    }
}

fn array_key(key: &str) -> Result<usize, EvalError> {
    let n = parse_number(key);
    if n.is_nan() {
        return Err(type_mismatch("a numeric array index", format!("`{key}`")));
    }
    to_index(n).ok_or_else(|| index_out_of_bounds(key))
}

impl Interpreter {
    /// Arrays need a computed numeric index in range. Objects fail on a
    /// missing `.name` but yield `none` on a missing `[key]`.
    pub(super) fn eval_member(
        &mut self,
        object: &Expr,
        property: &Expr,
        computed: bool,
        scopes: &Scopes,
    ) -> EvalResult {
        let target = self.eval_expr(object, scopes)?;
        match &target {
            Value::Array(items) => {
                if !computed {
                    return Err(type_mismatch(
                        "a computed index on an array",
                        "a named property",
                    ));
                }
                let index = self.eval_expr(property, scopes)?;
                let Value::Number(n) = index else {
                    return Err(type_mismatch("a numeric array index", index.type_name()));
                };
                to_index(n)
                    .and_then(|i| items.borrow().get(i).cloned())
                    .ok_or_else(|| index_out_of_bounds(render_number(n)))
            }
            Value::Object(entries) => {
                if let (false, Expr::Ident(name)) = (computed, property) {
                    return entries
                        .borrow()
                        .get(name)
                        .cloned()
                        .ok_or_else(|| missing_member(name));
                }
                let key = stringify(&self.eval_expr(property, scopes)?);
                let found = entries.borrow().get(&key).cloned();
                match found {
                    Some(value) => Ok(value),
                    None if computed => Ok(Value::None),
                    None => Err(missing_member(&key)),
                }
            }
            other => Err(type_mismatch(
                "an array or object to read a property from",
                other.type_name(),
            )),
        }
    }

    pub(super) fn eval_assign(
        &mut self,
        target: &Expr,
        value: &Expr,
        scopes: &Scopes,
    ) -> EvalResult {
        match target {
            Expr::Ident(name) => {
                let value = self.eval_expr(value, scopes)?;
                scopes.current.assign(name, value)
            }
            Expr::Member { .. } => self.assign_member(target, value, scopes),
            _ => Err(invalid_assignment_target()),
        }
    }

    /// Walk `a.b[c]...` from the root container. A missing key is created
    /// only at the end of the chain; a non-container met on the way is
    /// overwritten where it stands.
    fn assign_member(&mut self, target: &Expr, value: &Expr, scopes: &Scopes) -> EvalResult {
        let mut keys = Vec::new();
        let root = self.flatten_member(target, &mut keys, scopes)?;
        let mut container = Container::of(&root).ok_or_else(|| {
            type_mismatch("an array or object to assign into", root.type_name())
        })?;
        let value = self.eval_expr(value, scopes)?;

        let last = keys.len().saturating_sub(1);
        for (i, key) in keys.iter().enumerate() {
            let existing = container.get(key)?;
            let next = match &existing {
                Some(found) if i < last => Container::of(found),
                Some(_) => None,
                None if i < last => return Err(missing_member(key)),
                None => None,
            };
            match next {
                Some(inner) => container = inner,
                None => {
                    container.set(key, value.clone())?;
                    return Ok(value);
                }
            }
        }
        Ok(value)
    }

    /// Collect the keys of a member chain and return the value at its root.
    fn flatten_member(
        &mut self,
        expr: &Expr,
        keys: &mut Vec<String>,
        scopes: &Scopes,
    ) -> EvalResult {
        match expr {
            Expr::Member {
                object,
                property,
                computed,
            } => {
                let root = self.flatten_member(object, keys, scopes)?;
                let key = match (computed, property.as_ref()) {
                    (false, Expr::Ident(name)) | (true, Expr::Str(name)) => name.clone(),
                    _ => stringify(&self.eval_expr(property, scopes)?),
                };
                keys.push(key);
                Ok(root)
            }
            _ => self.eval_expr(expr, scopes),
        }
    }
}
