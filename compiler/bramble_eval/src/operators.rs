//! Binary and unary operators.
//!
//! Direct enum-based dispatch: the operator set and the value set are both
//! fixed, so each operator matches on its operands.

use std::rc::Rc;

use bramble_ir::{BinaryOp, UnaryOp};

use crate::errors::{
    binary_type_mismatch, division_by_zero, type_mismatch, EvalError, EvalResult,
};
use crate::value::{is_truthy, numberify, parse_number, render_number, stringify, Value};

/// Evaluate `left op right`. Both operands are already evaluated.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => arithmetic(op, left, right, |a, b| a - b),
        BinaryOp::Mul => arithmetic(op, left, right, |a, b| a * b),
        BinaryOp::Mod => arithmetic(op, left, right, |a, b| a % b),
        BinaryOp::Pow => arithmetic(op, left, right, f64::powf),
        BinaryOp::Div => {
            let (a, b) = both_numbers(op, left, right)?;
            // Zero on either side is rejected, not only the divisor
            if a == 0.0 || b == 0.0 {
                return Err(division_by_zero());
            }
            Ok(Value::Number(a / b))
        }
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => compare(op, left, right),
        BinaryOp::Eq => Ok(Value::Boolean(values_equal(left, right)?)),
        BinaryOp::NotEq => Ok(Value::Boolean(!values_equal(left, right)?)),
    }
}

pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match op {
        UnaryOp::Neg => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(type_mismatch("a number for unary `-`", other.type_name())),
        },
        UnaryOp::Not => Ok(Value::Boolean(!is_truthy(operand))),
    }
}

/// Numeric addition, or text concatenation when either side is not a number.
fn add(left: &Value, right: &Value) -> EvalResult {
    if let (Value::Number(a), Value::Number(b)) = (left, right) {
        return Ok(Value::Number(a + b));
    }
    let mut text = concat_operand(left)?;
    text.push_str(&concat_operand(right)?);
    Ok(Value::string(text))
}

fn concat_operand(value: &Value) -> Result<String, EvalError> {
    match value {
        Value::Number(n) => Ok(render_number(*n)),
        Value::String(s) => Ok(s.to_string()),
        Value::Array(_) | Value::Object(_) => Ok(stringify(value)),
        other => Err(type_mismatch(
            "a number, string, array or object for `+`",
            other.type_name(),
        )),
    }
}

fn both_numbers(op: BinaryOp, left: &Value, right: &Value) -> Result<(f64, f64), EvalError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(binary_type_mismatch(op.as_symbol(), left, right)),
    }
}

#[inline]
fn arithmetic(op: BinaryOp, left: &Value, right: &Value, f: fn(f64, f64) -> f64) -> EvalResult {
    let (a, b) = both_numbers(op, left, right)?;
    Ok(Value::Number(f(a, b)))
}

fn compare(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    let coerce = |v: &Value| {
        numberify(v).map_err(|_| {
            type_mismatch(
                format!("comparable operands for `{}`", op.as_symbol()),
                format!("{} and {}", left.type_name(), right.type_name()),
            )
        })
    };
    let a = coerce(left)?;
    let b = coerce(right)?;
    let result = match op {
        BinaryOp::Lt => a < b,
        BinaryOp::LtEq => a <= b,
        BinaryOp::Gt => a > b,
        _ => a >= b,
    };
    Ok(Value::Boolean(result))
}

/// `==` semantics.
///
/// Primitives compare by value with loose numeric coercion between numbers,
/// strings and booleans; `none` equals only `none`. Containers compare by
/// identity. Function-like and class-like operands are an error.
pub fn values_equal(left: &Value, right: &Value) -> Result<bool, EvalError> {
    let l = Primitive::of(left)?;
    let r = Primitive::of(right)?;
    Ok(match (l, r) {
        (Primitive::None, Primitive::None) => true,
        (Primitive::None, _) | (_, Primitive::None) => false,
        (Primitive::Str(a), Primitive::Str(b)) => a == b,
        (Primitive::Bool(a), Primitive::Bool(b)) => a == b,
        (Primitive::Array(a), Primitive::Array(b)) => Rc::ptr_eq(&a, &b),
        (Primitive::Object(a), Primitive::Object(b)) => Rc::ptr_eq(&a, &b),
        (Primitive::Array(_) | Primitive::Object(_), _)
        | (_, Primitive::Array(_) | Primitive::Object(_)) => false,
        (a, b) => a.loose_number() == b.loose_number(),
    })
}

/// The raw value `==` looks at.
enum Primitive<'a> {
    None,
    Num(f64),
    Str(&'a str),
    Bool(bool),
    Array(crate::value::ArrayRef),
    Object(crate::value::ObjectRef),
}

impl<'a> Primitive<'a> {
    fn of(value: &'a Value) -> Result<Primitive<'a>, EvalError> {
        match value {
            Value::None => Ok(Primitive::None),
            Value::Number(n) => Ok(Primitive::Num(*n)),
            Value::String(s) | Value::Print(s) => Ok(Primitive::Str(s)),
            Value::Boolean(b) => Ok(Primitive::Bool(*b)),
            Value::Array(a) => Ok(Primitive::Array(Rc::clone(a))),
            Value::Object(o) => Ok(Primitive::Object(Rc::clone(o))),
            Value::ClassVariable(v) => Primitive::of(&v.value),
            other @ (Value::NativeMethod(_)
            | Value::Function(_)
            | Value::Method(_)
            | Value::Constructor(_)
            | Value::ClassMethod(_)
            | Value::Class(_)) => Err(type_mismatch(
                "a comparable value for `==`",
                other.type_name(),
            )),
        }
    }

    fn loose_number(&self) -> f64 {
        match self {
            Primitive::Num(n) => *n,
            Primitive::Str(s) => parse_number(s),
            Primitive::Bool(b) => f64::from(u8::from(*b)),
            Primitive::None | Primitive::Array(_) | Primitive::Object(_) => f64::NAN,
        }
    }
}
