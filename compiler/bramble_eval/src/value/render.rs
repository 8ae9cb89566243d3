//! Coercions: text rendering, numeric coercion and truthiness.

use std::fmt::Write as _;

use super::Value;
use crate::errors::{type_mismatch, EvalError};

/// Containers nested deeper than this render as [`TOO_DEEP`].
const MAX_RENDER_DEPTH: usize = 3;
const TOO_DEEP: &str = "[Object]";

/// Render a value as text.
///
/// Total: every value has a rendering, and self-referential containers stop
/// at the depth guard.
pub fn stringify(value: &Value) -> String {
    let mut out = String::new();
    render_into(&mut out, value, 0);
    out
}

fn render_into(out: &mut String, value: &Value, depth: usize) {
    if depth > MAX_RENDER_DEPTH {
        out.push_str(TOO_DEEP);
        return;
    }

    match value {
        Value::None => out.push_str("none"),
        Value::Number(n) => out.push_str(&render_number(*n)),
        Value::String(s) | Value::Print(s) => out.push_str(s),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Array(items) => {
            let items = items.borrow();
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                out.push_str(if i == 0 { " " } else { ", " });
                render_element(out, item, depth + 1);
            }
            out.push_str(" ]");
        }
        Value::Object(entries) => {
            let entries = entries.borrow();
            out.push('{');
            for (i, (key, item)) in entries.iter().enumerate() {
                out.push_str(if i == 0 { " " } else { ", " });
                out.push_str(key);
                out.push_str(": ");
                render_element(out, item, depth + 1);
            }
            out.push_str(" }");
        }
        Value::NativeMethod(_) => out.push_str("[NativeMethod]"),
        Value::Function(f) => {
            let name = f.name.as_deref().unwrap_or_default();
            let _ = write!(out, "[Function {name}]: ({}) => any", f.params);
        }
        Value::Method(m) => {
            let _ = write!(out, "[Method]: ({}) => any", m.params);
        }
        Value::Constructor(c) => {
            let _ = write!(out, "[Constructor]: ({}) => any", c.params);
        }
        Value::ClassMethod(m) => {
            let _ = write!(out, "{}: ({}) => any", m.name, m.params);
        }
        Value::ClassVariable(v) => render_into(out, &v.value, depth),
        Value::Class(c) => {
            let _ = write!(out, "[Class {}]", c.name);
        }
    }
}

/// Strings inside containers are quoted.
fn render_element(out: &mut String, value: &Value, depth: usize) {
    if matches!(value, Value::String(_)) {
        out.push('"');
        render_into(out, value, depth);
        out.push('"');
    } else {
        render_into(out, value, depth);
    }
}

/// Magnitudes at or above this render in exponent form.
const EXPONENT_ABOVE: f64 = 1e21;
/// Nonzero magnitudes below this render in exponent form.
const EXPONENT_BELOW: f64 = 1e-6;

/// Shortest round-trip decimal, without a trailing `.0`.
///
/// Very large and very small magnitudes switch to exponent form with an
/// explicit sign on the exponent: `1e+23`, `1.5e-7`.
pub fn render_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // Covers -0
        return "0".to_string();
    }
    let magnitude = n.abs();
    if magnitude >= EXPONENT_ABOVE || magnitude < EXPONENT_BELOW {
        return render_exponent(n);
    }
    let text = n.to_string();
    match text.strip_suffix(".0") {
        Some(trimmed) => trimmed.to_string(),
        None => text,
    }
}

/// `{:e}` already picks the shortest mantissa; only the exponent sign differs.
fn render_exponent(n: f64) -> String {
    let text = format!("{n:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

/// Parse numeric text the way `tonumber` and string coercion do.
///
/// Surrounding whitespace is ignored and empty text is 0. Unsigned `0x`,
/// `0o` and `0b` integers are read in their radix. Anything else that is
/// not a plain decimal (or `Infinity`) is NaN rather than an error.
pub fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(n) = parse_radix(text) {
        return n;
    }
    // Rust's float grammar also accepts `inf` and `nan`
    if !text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

/// `Some` when `text` carries a radix prefix; NaN if its digits are bad.
fn parse_radix(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(f64::NAN);
    }
    Some(digits.chars().fold(0.0, |acc, c| {
        acc * f64::from(radix) + f64::from(c.to_digit(radix).unwrap_or(0))
    }))
}

/// Coerce a value to a number for comparisons.
pub fn numberify(value: &Value) -> Result<f64, EvalError> {
    match value {
        Value::Array(items) => Ok(count_as_f64(items.borrow().len())),
        // Every entry weighs 2, whatever it holds
        Value::Object(entries) => Ok(2.0 * count_as_f64(entries.borrow().len())),
        Value::Number(n) => Ok(*n),
        Value::String(s) | Value::Print(s) => Ok(parse_number(s)),
        Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::None => Ok(0.0),
        Value::ClassVariable(v) => numberify(&v.value),
        other @ (Value::NativeMethod(_)
        | Value::Function(_)
        | Value::Method(_)
        | Value::Constructor(_)
        | Value::ClassMethod(_)
        | Value::Class(_)) => Err(type_mismatch("a value with a numeric form", other.type_name())),
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "container lengths are far below 2^52"
)]
fn count_as_f64(len: usize) -> f64 {
    len as f64
}

/// Only `none` and `false` are falsy.
#[inline]
pub fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::None | Value::Boolean(false))
}
