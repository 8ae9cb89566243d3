//! Host functions seeded into the root frame.
//!
//! | Name | Arguments |
//! |---|---|
//! | `tostring(...)` | at least 1 |
//! | `tonumber(...)` | at least 1 |
//! | `random(max, min)` | 2 numbers |
//! | `utility.time()` | none |
//! | `console.input(prompt)` | 1 string |
//! | `console.log(...)` | at least 1 |

use std::io::BufRead as _;
use std::time::{SystemTime, UNIX_EPOCH};

use indexmap::IndexMap;
use rand::Rng as _;

use crate::environment::{Environment, Variable};
use crate::errors::{arity_mismatch, io_error, native_error, too_few_arguments, EvalResult};
use crate::interpreter::Interpreter;
use crate::value::{parse_number, stringify, NativeFn, Value};

pub(crate) fn install(env: &Environment) {
    env.define("tostring", Variable::global(Value::native("tostring", tostring)));
    env.define("tonumber", Variable::global(Value::native("tonumber", tonumber)));
    env.define("random", Variable::global(Value::native("random", random)));
    env.define(
        "utility",
        Variable::global(namespace(&[("time", "utility.time", time)])),
    );
    env.define(
        "console",
        Variable::global(namespace(&[
            ("input", "console.input", input),
            ("log", "console.log", log),
        ])),
    );
}

fn namespace(entries: &[(&str, &'static str, NativeFn)]) -> Value {
    let map: IndexMap<String, Value> = entries
        .iter()
        .map(|&(key, name, func)| (key.to_string(), Value::native(name, func)))
        .collect();
    Value::object(map)
}

fn concat_rendered(args: &[Value]) -> String {
    args.iter().map(stringify).collect()
}

fn tostring(_: &Interpreter, args: &[Value]) -> EvalResult {
    if args.is_empty() {
        return Err(too_few_arguments("tostring", 1, 0));
    }
    Ok(Value::string(concat_rendered(args)))
}

fn tonumber(_: &Interpreter, args: &[Value]) -> EvalResult {
    if args.is_empty() {
        return Err(too_few_arguments("tonumber", 1, 0));
    }
    Ok(Value::Number(parse_number(&concat_rendered(args))))
}

/// Uniform integer in `[min, max]`.
fn random(_: &Interpreter, args: &[Value]) -> EvalResult {
    let [max, min] = args else {
        return Err(arity_mismatch("random", 2, args.len()));
    };
    let (Some(max), Some(min)) = (max.as_number(), min.as_number()) else {
        return Err(native_error("random", "both arguments must be numbers"));
    };
    let r: f64 = rand::thread_rng().gen();
    Ok(Value::Number((r * (max - min + 1.0)).floor() + min))
}

/// Milliseconds since the Unix epoch.
fn time(_: &Interpreter, args: &[Value]) -> EvalResult {
    if !args.is_empty() {
        return Err(arity_mismatch("utility.time", 0, args.len()));
    }
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| native_error("utility.time", e.to_string()))?;
    Ok(Value::Number(elapsed.as_secs_f64() * 1000.0))
}

/// Show `prompt`, then read one line from stdin without its line ending.
fn input(interp: &Interpreter, args: &[Value]) -> EvalResult {
    let [prompt] = args else {
        return Err(arity_mismatch("console.input", 1, args.len()));
    };
    let Some(prompt) = prompt.as_str() else {
        return Err(native_error(
            "console.input",
            format!("expected the prompt to be a string, got {}", prompt.type_name()),
        ));
    };
    interp.print_handler().print(prompt);

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| io_error(&e))?;
    let trimmed = line.trim_end_matches(['\n', '\r']);
    Ok(Value::string(trimmed))
}

/// Rendered arguments joined by a space. Returns the text; it does not print.
fn log(_: &Interpreter, args: &[Value]) -> EvalResult {
    if args.is_empty() {
        return Err(too_few_arguments("console.log", 1, 0));
    }
    let parts: Vec<String> = args.iter().map(stringify).collect();
    Ok(Value::string(parts.join(" ")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::errors::EvalErrorKind;
    use pretty_assertions::assert_eq;

    fn call(name: &str, args: &[Value]) -> EvalResult {
        let interp = Interpreter::new();
        let root = Environment::root();
        let value = match name.split_once('.') {
            Some((ns, key)) => match root.lookup(ns).unwrap().value {
                Value::Object(map) => map.borrow().get(key).cloned().unwrap(),
                other => panic!("{ns} is {other:?}"),
            },
            None => root.lookup(name).unwrap().value,
        };
        match value {
            Value::NativeMethod(native) => (native.func)(&interp, args),
            other => panic!("{name} is {other:?}"),
        }
    }

    #[test]
    fn tostring_concatenates_renderings() {
        let args = [Value::Number(1.0), Value::string("a"), Value::Boolean(true)];
        assert_eq!(call("tostring", &args).unwrap().as_str(), Some("1atrue"));
    }

    #[test]
    fn tonumber_parses_concatenation() {
        let args = [Value::Number(1.0), Value::string("2")];
        assert_eq!(call("tonumber", &args).unwrap().as_number(), Some(12.0));
        let nan = call("tonumber", &[Value::string("x")]).unwrap();
        assert!(nan.as_number().unwrap().is_nan());
    }

    #[test]
    fn conversion_natives_need_an_argument() {
        for name in ["tostring", "tonumber", "console.log"] {
            let err = call(name, &[]).unwrap_err();
            assert!(
                matches!(err.kind, EvalErrorKind::ArityMismatch { at_least: true, .. }),
                "{name}: {err}"
            );
        }
    }

    #[test]
    fn random_stays_in_range() {
        for _ in 0..50 {
            let n = call("random", &[Value::Number(3.0), Value::Number(1.0)])
                .unwrap()
                .as_number()
                .unwrap();
            assert!((1.0..=3.0).contains(&n));
            assert_eq!(n.fract(), 0.0);
        }
    }

    #[test]
    fn random_checks_arguments() {
        let err = call("random", &[Value::Number(1.0)]).unwrap_err();
        assert_eq!(err.to_string(), "random expects 2 arguments, got 1");
        let err = call("random", &[Value::string("a"), Value::Number(1.0)]).unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::NativeError { .. }));
    }

    #[test]
    fn time_takes_no_arguments() {
        assert!(call("utility.time", &[]).unwrap().as_number().unwrap() > 0.0);
        let err = call("utility.time", &[Value::None]).unwrap_err();
        assert_eq!(err.to_string(), "utility.time expects 0 arguments, got 1");
    }

    #[test]
    fn input_validates_prompt() {
        let err = call("console.input", &[]).unwrap_err();
        assert_eq!(err.to_string(), "console.input expects 1 argument, got 0");
        let err = call("console.input", &[Value::Number(1.0)]).unwrap_err();
        assert!(err.to_string().contains("prompt to be a string"));
    }

    #[test]
    fn log_joins_with_spaces() {
        let args = [Value::string("a"), Value::Number(2.0), Value::None];
        assert_eq!(call("console.log", &args).unwrap().as_str(), Some("a 2 none"));
    }
}
