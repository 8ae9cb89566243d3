use bramble::{
    run_source, Error, ErrorCategory, EvalErrorKind, LexErrorKind, ParseErrorKind, RunConfig,
};
use pretty_assertions::assert_eq;

use crate::common::{fail, run};

#[test]
fn unterminated_string_is_a_lex_error() {
    let err = fail("print 'abc");
    assert_eq!(err.category(), ErrorCategory::Lex);
    assert!(matches!(
        err,
        Error::Lex(ref lex) if lex.kind == LexErrorKind::UnterminatedString
    ));
}

#[test]
fn lone_ampersand_is_a_lex_error() {
    let err = fail("print true & false");
    assert!(matches!(
        err,
        Error::Lex(ref lex) if lex.kind == (LexErrorKind::UnexpectedCharacter { found: '&' })
    ));
}

#[test]
fn unclosed_paren_is_a_parse_error() {
    let err = fail("print (1 + 2;");
    assert_eq!(err.category(), ErrorCategory::Parse);
    assert!(matches!(
        err,
        Error::Parse(ref parse) if matches!(parse.kind, ParseErrorKind::UnexpectedToken { .. })
    ));
}

#[test]
fn class_shape_errors_are_parse_errors() {
    let cases = [
        (
            "class A { constructor() { } constructor() { } }",
            ParseErrorKind::MultipleConstructors,
        ),
        (
            "class A { private constructor() { } }",
            ParseErrorKind::PrivateConstructor,
        ),
        ("class A { readonly x; }", ParseErrorKind::ReadonlyField),
        ("class A { x = 1; }", ParseErrorKind::FieldInitializer),
    ];
    for (source, expected) in cases {
        match fail(source) {
            Error::Parse(err) => assert_eq!(err.kind, expected, "{source}"),
            other => panic!("{source}: expected a parse error, got {other}"),
        }
    }
}

#[test]
fn parse_errors_stop_before_anything_runs() {
    // The print would run first if evaluation started
    let err = fail("print 'never'; print (;");
    assert_eq!(err.category(), ErrorCategory::Parse);
}

#[test]
fn division_by_zero_fails_before_output() {
    let err = fail("print 1/0;");
    assert_eq!(err.category(), ErrorCategory::Runtime);
    assert!(matches!(
        err,
        Error::Runtime(ref eval) if eval.kind == EvalErrorKind::DivisionByZero
    ));
}

#[test]
fn reading_private_member_from_outside_fails() {
    let source = "class C { private secret; constructor(v) { this.secret = v; } \
                  getSecret() { return this.secret; } } var o = new C(7); o.secret;";
    match fail(source) {
        Error::Runtime(err) => assert_eq!(
            err.kind,
            EvalErrorKind::MissingMember {
                key: "secret".into()
            }
        ),
        other => panic!("expected a runtime error, got {other}"),
    }
}

#[test]
fn recursion_limit_is_a_runtime_error() {
    let config = RunConfig {
        max_call_depth: 64,
        ..RunConfig::silent()
    };
    let err = run_source("function down(n) { return down(n + 1); } down(0);", &config)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Runtime(ref eval) if eval.kind == (EvalErrorKind::RecursionLimit { limit: 64 })
    ));
}

#[test]
fn deep_recursion_under_default_limit_succeeds() {
    let source = "function sum(n) { if (n == 0) { return 0; } return n + sum(n - 1); } sum(1500);";
    let outcome = run(source).unwrap();
    assert_eq!(outcome.value.as_number(), Some(1_125_750.0));
}

#[test]
fn runtime_errors_keep_earlier_output_out_of_the_result() {
    let err = fail("print 'first'; missing();");
    assert_eq!(
        err.to_string(),
        "runtime error: undefined variable `missing`"
    );
}

#[test]
fn error_display_names_the_phase() {
    assert!(fail("print 'x").to_string().starts_with("lex error: "));
    assert!(fail("var = 1;").to_string().starts_with("parse error: "));
    assert!(fail("print y;").to_string().starts_with("runtime error: "));
}

#[test]
fn category_names() {
    assert_eq!(ErrorCategory::Lex.to_string(), "lex");
    assert_eq!(ErrorCategory::Parse.to_string(), "parse");
    assert_eq!(ErrorCategory::Runtime.to_string(), "runtime");
}
