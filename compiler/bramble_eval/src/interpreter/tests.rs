#![allow(clippy::unwrap_used)]

use super::*;
use crate::errors::EvalErrorKind;
use crate::print_handler::{buffer_handler, silent_handler};
use bramble_ir::ast::{ClassDecl, ClassField, ClassMember};
use pretty_assertions::assert_eq;

fn program(source: &str) -> Program {
    let tokens = bramble_lexer::lex(source).unwrap();
    bramble_parse::parse(&tokens).unwrap()
}

fn try_run(source: &str) -> (Result<Value, EvalError>, Vec<String>) {
    let mut interp = Interpreter::builder()
        .print_handler(silent_handler())
        .build();
    let result = interp.interpret(&program(source), &Scopes::root());
    (result, interp.take_logs())
}

/// Run and return the print log.
fn logs(source: &str) -> Vec<String> {
    let (result, logs) = try_run(source);
    result.unwrap();
    logs
}

fn error(source: &str) -> EvalErrorKind {
    try_run(source).0.unwrap_err().kind
}

// Basics

#[test]
fn print_concatenates_without_separator() {
    assert_eq!(logs("var x = 5; print x + 1;"), vec!["6"]);
    assert_eq!(logs("print 'a', 1, true;"), vec!["a1true"]);
}

#[test]
fn program_value_is_last_statement() {
    let (result, _) = try_run("var a = 1; a + 41");
    assert_eq!(result.unwrap().as_number(), Some(42.0));
}

#[test]
fn print_returns_print_value() {
    let (result, _) = try_run("print 'hi'");
    assert!(matches!(result.unwrap(), Value::Print(text) if &*text == "hi"));
}

#[test]
fn print_goes_to_the_handler_too() {
    let handler = buffer_handler();
    let mut interp = Interpreter::builder()
        .print_handler(Rc::clone(&handler))
        .build();
    interp
        .interpret(&program("print 1; print 'two'"), &Scopes::root())
        .unwrap();
    assert_eq!(handler.get_output(), "1\ntwo\n");
    assert_eq!(interp.logs(), ["1", "two"]);
}

#[test]
fn undefined_variable_fails() {
    assert_eq!(
        error("print nope"),
        EvalErrorKind::UndefinedVariable {
            name: "nope".into()
        }
    );
}

#[test]
fn division_by_zero_fails_before_output() {
    let (result, logs) = try_run("print 1/0;");
    assert_eq!(result.unwrap_err().kind, EvalErrorKind::DivisionByZero);
    assert!(logs.is_empty());
}

// Declarations and scope

#[test]
fn redeclaration_in_same_scope_fails() {
    assert_eq!(
        error("var a = 1; var a = 2;"),
        EvalErrorKind::AlreadyDeclared { name: "a".into() }
    );
}

#[test]
fn block_shadowing_does_not_leak() {
    assert_eq!(logs("var a = 1; { var a = 2; print a; } print a;"), vec!["2", "1"]);
}

#[test]
fn assignment_to_undeclared_name_declares_locally() {
    assert_eq!(logs("{ fresh = 3; print fresh; }"), vec!["3"]);
    assert_eq!(
        error("{ fresh = 3; } print fresh;"),
        EvalErrorKind::UndefinedVariable {
            name: "fresh".into()
        }
    );
}

#[test]
fn global_declarations_reach_the_root_frame() {
    assert_eq!(
        logs("function f() { global g = 7; } f(); print g;"),
        vec!["7"]
    );
}

#[test]
fn bare_top_level_return_fails() {
    assert_eq!(error("return 1;"), EvalErrorKind::ReturnOutsideFunction);
}

#[test]
fn return_escaping_a_top_level_block_is_absorbed() {
    assert_eq!(logs("{ return 1; } print 'after';"), vec!["after"]);
}

// Operators

#[test]
fn logical_operators_return_operands() {
    assert_eq!(logs("print none || 'x', 0 && 'y', false && boom"), vec!["xyfalse"]);
}

#[test]
fn string_concatenation_renders_containers() {
    assert_eq!(logs("print 'v=' + [1, 'a']"), vec![r#"v=[ 1, "a" ]"#]);
}

#[test]
fn object_comparison_counts_every_entry() {
    assert_eq!(
        logs("var o = {a: none, b: false}; print o > 3, ' ', o < 5"),
        vec!["true true"]
    );
}

#[test]
fn extreme_numbers_print_in_exponent_form() {
    assert_eq!(
        logs("print 100000000000000000000000, ' ', 0.0000001"),
        vec!["1e+23 1e-7"]
    );
}

#[test]
fn tonumber_reads_hex_text() {
    assert_eq!(logs("print tonumber('0x10') + 1"), vec!["17"]);
}

#[test]
fn equality_on_function_fails() {
    assert!(matches!(
        error("function f() { } print f == 1"),
        EvalErrorKind::TypeMismatch { .. }
    ));
}

// Functions

#[test]
fn function_call_returns_value() {
    assert_eq!(
        logs("function add(a, b) { return a + b; } print add(2,3);"),
        vec!["5"]
    );
}

#[test]
fn function_without_return_yields_none() {
    assert_eq!(logs("function f() { 1 + 1; } print f();"), vec!["none"]);
}

#[test]
fn variadic_collects_rest() {
    assert_eq!(
        logs("function f(a, ...rest) { return rest; } print f(1,2,3); print f(1);"),
        vec!["[ 2, 3 ]", "[ ]"]
    );
}

#[test]
fn too_few_arguments_fails() {
    assert_eq!(
        error("function f(a, b) { } f(1);"),
        EvalErrorKind::ArityMismatch {
            name: "f".into(),
            expected: 2,
            got: 1,
            at_least: true,
        }
    );
}

#[test]
fn extra_arguments_are_ignored() {
    assert_eq!(logs("function f(a) { return a; } print f(1, 2);"), vec!["1"]);
}

#[test]
fn closures_share_their_defining_frame() {
    let source = "
        function counter() {
            var n = 0;
            return function() { n = n + 1; return n; };
        }
        var c = counter();
        c(); c();
        print c();
    ";
    assert_eq!(logs(source), vec!["3"]);
}

#[test]
fn closures_are_lexical_not_dynamic() {
    let source = "
        var x = 'outer';
        function show() { return x; }
        function wrapper() { var x = 'inner'; return show(); }
        print wrapper();
    ";
    assert_eq!(logs(source), vec!["outer"]);
}

#[test]
fn calling_a_non_function_fails() {
    assert_eq!(
        error("var x = 5; x();"),
        EvalErrorKind::NotCallable { value: "5".into() }
    );
}

#[test]
fn anonymous_function_renders_as_method() {
    assert_eq!(
        logs("print function(a, ...r) { }"),
        vec!["[Method]: (a,...) => any"]
    );
}

#[test]
fn runaway_recursion_hits_depth_limit() {
    let mut interp = Interpreter::builder()
        .print_handler(silent_handler())
        .max_call_depth(50)
        .build();
    let err = interp
        .interpret(&program("function f() { return f(); } f();"), &Scopes::root())
        .unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::RecursionLimit { limit: 50 });
}

#[test]
fn depth_counter_recovers_after_error() {
    let mut interp = Interpreter::builder()
        .print_handler(silent_handler())
        .max_call_depth(3)
        .build();
    let scopes = Scopes::root();
    let source = "function f(n) { if (n > 0) { return f(n - 1); } return 1/0; }";
    interp.interpret(&program(source), &scopes).unwrap();
    for _ in 0..5 {
        let err = interp.interpret(&program("f(1);"), &scopes).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    }
}

// Control flow

#[test]
fn if_else_chain() {
    let source = "
        function grade(n) {
            if (n > 90) { return 'a'; } else if (n > 50) { return 'b'; } else { return 'c'; }
        }
        print grade(95), grade(60), grade(1);
    ";
    assert_eq!(logs(source), vec!["abc"]);
}

#[test]
fn return_inside_nested_if_propagates() {
    let source = "
        function f(x) {
            if (x) { if (true) { return 'deep'; } }
            return 'shallow';
        }
        print f(true), f(false);
    ";
    assert_eq!(logs(source), vec!["deepshallow"]);
}

#[test]
fn while_with_counter() {
    assert_eq!(
        logs("while (i < 3; var i = 0) { print i; }"),
        vec!["0", "1", "2"]
    );
}

#[test]
fn while_counter_starts_at_given_value() {
    assert_eq!(logs("while (i < 7; var i = 5) { print i; }"), vec!["5", "6"]);
}

#[test]
fn while_body_frame_is_fresh_each_iteration() {
    let source = "
        var n = 0;
        while (n < 2) { var inner = n; n = n + 1; }
        print n;
    ";
    assert_eq!(logs(source), vec!["2"]);
}

#[test]
fn return_from_inside_while() {
    let source = "
        function first() { while (true; var i = 0) { if (i == 4) { return i; } } }
        print first();
    ";
    assert_eq!(logs(source), vec!["4"]);
}

#[test]
fn for_loop_counts() {
    assert_eq!(
        logs("for (var i = 0; i < 3; i = i + 1) { print i; }"),
        vec!["0", "1", "2"]
    );
}

#[test]
fn for_loop_auto_increments_numeric_counter() {
    // The update runs but the counter is reset to start + iterations
    assert_eq!(
        logs("for (var i = 10; i < 12; none) { print i; }"),
        vec!["10", "11"]
    );
}

#[test]
fn for_body_declarations_do_not_collide() {
    assert_eq!(
        logs("for (var i = 0; i < 2; i = i + 1) { var x = i; print x; }"),
        vec!["0", "1"]
    );
}

#[test]
fn do_expression_yields_return_value() {
    assert_eq!(logs("var x = do { var a = 2; return a * 3; }; print x;"), vec!["6"]);
    assert_eq!(logs("print do { 1; }"), vec!["none"]);
}

// Containers

#[test]
fn array_index_reads() {
    assert_eq!(logs("var a = [10, 20]; print a[1];"), vec!["20"]);
    assert_eq!(
        error("var a = [10]; print a[3];"),
        EvalErrorKind::IndexOutOfBounds { index: "3".into() }
    );
    assert!(matches!(
        error("var a = [10]; print a.length;"),
        EvalErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn object_reads_are_hard_for_dot_and_soft_for_brackets() {
    assert_eq!(logs("var o = { a: 1 }; print o.a, o['b'];"), vec!["1none"]);
    assert_eq!(
        error("var o = { a: 1 }; print o.b;"),
        EvalErrorKind::MissingMember { key: "b".into() }
    );
}

#[test]
fn object_shorthand_reads_variable() {
    assert_eq!(logs("var a = 3; var o = { a }; print o;"), vec!["{ a: 3 }"]);
}

#[test]
fn member_assignment_walks_the_chain() {
    let source = "
        var o = { inner: { x: 1 } };
        o.inner.x = 5;
        o.inner.y = 6;
        print o;
    ";
    assert_eq!(logs(source), vec!["{ inner: { x: 5, y: 6 } }"]);
}

#[test]
fn member_assignment_missing_intermediate_fails() {
    assert_eq!(
        error("var o = {}; o.a.b = 1;"),
        EvalErrorKind::MissingMember { key: "a".into() }
    );
}

#[test]
fn computed_assignment_evaluates_the_key() {
    let source = "
        var a = [1, 2];
        var i = 1;
        a[i] = 9;
        a[2] = 3;
        print a;
    ";
    assert_eq!(logs(source), vec!["[ 1, 9, 3 ]"]);
}

#[test]
fn containers_are_shared_between_holders() {
    assert_eq!(
        logs("var a = { n: 1 }; var b = a; b.n = 2; print a.n;"),
        vec!["2"]
    );
}

#[test]
fn assignment_value_is_assigned_value() {
    assert_eq!(logs("var o = { a: 1 }; print o.a = 4;"), vec!["4"]);
}

#[test]
fn variadic_marker_outside_params_fails() {
    assert_eq!(
        error("var x = ...rest;"),
        EvalErrorKind::InfiniteOutsideParams {
            name: "rest".into()
        }
    );
}

// Classes

const COUNTER: &str = "
    class Counter {
        private count;
        public label;
        constructor(label, start) {
            this.label = label;
            this.count = start;
        }
        increment() { this.count = this.count + 1; return this.count; }
        peek() { return this.count; }
        private hidden() { return 'secret'; }
        reveal() { return this.hidden(); }
    }
";

#[test]
fn private_members_are_absent_from_public_view() {
    let source = format!("{COUNTER} var c = new Counter('a', 1); print c.label; print c.count;");
    let (result, logs) = try_run(&source);
    assert_eq!(logs, vec!["a"]);
    assert_eq!(
        result.unwrap_err().kind,
        EvalErrorKind::MissingMember {
            key: "count".into()
        }
    );
}

#[test]
fn methods_reach_private_state() {
    let source = format!(
        "{COUNTER} var c = new Counter('a', 1); c.increment();
        print c.increment(); print c.reveal();"
    );
    assert_eq!(logs(&source), vec!["3", "secret"]);
}

#[test]
fn instances_do_not_share_private_state() {
    let source = format!(
        "{COUNTER}
        var a = new Counter('a', 0);
        var b = new Counter('b', 10);
        a.increment();
        print a.peek(), ',', b.peek();"
    );
    assert_eq!(logs(&source), vec!["1,10"]);
}

#[test]
fn constructor_arity_is_checked() {
    let source = format!("{COUNTER} new Counter('a');");
    assert_eq!(
        error(&source),
        EvalErrorKind::ArityMismatch {
            name: "Counter constructor".into(),
            expected: 2,
            got: 1,
            at_least: true,
        }
    );
}

#[test]
fn this_is_constant() {
    let source = "class C { constructor() { this = 1; } } new C();";
    assert_eq!(
        error(source),
        EvalErrorKind::ConstantAssignment {
            name: "this".into()
        }
    );
}

#[test]
fn class_without_constructor_still_instantiates() {
    let source = "class P { x; show() { return 'p'; } } var p = new P(); print p.x, p.show();";
    assert_eq!(logs(source), vec!["nonep"]);
}

#[test]
fn new_on_non_class_fails() {
    assert_eq!(
        error("var x = 1; new x();"),
        EvalErrorKind::NotAClass {
            name: "x".into(),
            got: "number"
        }
    );
}

#[test]
fn static_methods_have_no_this() {
    let source = "class M { static twice(n) { return n * 2; } } var m = new M(); print m.twice(4);";
    assert_eq!(logs(source), vec!["8"]);
    let source = "class M { static who() { return this; } } var m = new M(); m.who();";
    assert_eq!(
        error(source),
        EvalErrorKind::UndefinedVariable {
            name: "this".into()
        }
    );
}

#[test]
fn class_renders_by_name() {
    assert_eq!(logs("class Foo { } print Foo;"), vec!["[Class Foo]"]);
}

#[test]
fn methods_render_with_name_and_params() {
    let source = format!("{COUNTER} var c = new Counter('a', 1); print c.peek;");
    assert_eq!(logs(&source), vec!["peek: () => any"]);
}

#[test]
fn unbound_class_method_cannot_be_called() {
    let method = Rc::new(crate::value::ClassMethodValue {
        name: "m".into(),
        params: bramble_ir::Params::default(),
        body: Rc::from(Vec::new()),
        env: Environment::new(),
        is_static: false,
        is_private: false,
        binding: None,
    });
    let mut interp = Interpreter::builder()
        .print_handler(silent_handler())
        .build();
    let err = interp
        .call_value(&Value::ClassMethod(method), Vec::new())
        .unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::UninitializedMethod { name: "m".into() });
}

#[test]
fn field_defaults_are_shared_across_instances() {
    // Field initializers run once, at declaration time.
    let decl = ClassDecl {
        name: "Bag".into(),
        constructor: None,
        public: vec![ClassMember::Field(ClassField {
            name: "items".into(),
            is_private: false,
            is_readonly: false,
            value: Some(Expr::Array(vec![])),
        })],
        private: vec![],
    };
    let mut body = vec![Stmt::Class(decl)];
    body.extend(
        program(
            "var a = new Bag(); var b = new Bag();
             a.items[0] = 'x';
             print b.items;",
        )
        .body,
    );

    let mut interp = Interpreter::builder()
        .print_handler(silent_handler())
        .build();
    interp
        .interpret(&Program::new(body), &Scopes::root())
        .unwrap();
    assert_eq!(interp.logs(), [r#"[ "x" ]"#]);
}

// Natives through the interpreter

#[test]
fn natives_are_callable_from_scripts() {
    assert_eq!(
        logs("print tostring(1, 'a'); print tonumber('4', 2) + 1; print console.log('a', [1]);"),
        vec!["1a", "43", "a [ 1 ]"]
    );
}

#[test]
fn native_arity_errors_surface() {
    assert!(matches!(
        error("random(1);"),
        EvalErrorKind::ArityMismatch { .. }
    ));
}
