use bramble::{run_source, PrintMode, RunConfig, Value, DEFAULT_MAX_CALL_DEPTH};
use pretty_assertions::assert_eq;

use crate::common::{logs, run};

#[test]
fn print_of_arithmetic() {
    assert_eq!(logs("var x = 5; print x + 1;"), vec!["6"]);
}

#[test]
fn function_call() {
    assert_eq!(
        logs("function add(a, b) { return a + b; } print add(2,3);"),
        vec!["5"]
    );
}

#[test]
fn private_field_behind_getter() {
    let class = "class C { private secret; constructor(v) { this.secret = v; } \
                 getSecret() { return this.secret; } } var o = new C(7);";
    assert_eq!(logs(&format!("{class} print o.getSecret();")), vec!["7"]);
}

#[test]
fn variadic_rest_is_an_array() {
    let outcome = run("function f(a, ...rest) { return rest; } f(1,2,3);").unwrap();
    let Value::Array(items) = outcome.value else {
        panic!("expected an array, got {:?}", outcome.value);
    };
    let items: Vec<_> = items.borrow().iter().map(Value::as_number).collect();
    assert_eq!(items, vec![Some(2.0), Some(3.0)]);
}

#[test]
fn closure_sees_counter_frame_but_not_body_frame() {
    let source = "
        var fs = [];
        var n = 0;
        while (i < 3; var i = 0) {
            var j = i;
            fs[n] = function() { return i + ':' + j; };
            n = n + 1;
        }
        print fs[0](), ' ', fs[2]();
    ";
    assert_eq!(logs(source), vec!["3:0 3:2"]);
}

#[test]
fn self_containing_object_renders_finitely() {
    let printed = logs("var o = { a: 1 }; o.me = o; print o;");
    assert_eq!(printed.len(), 1);
    assert!(printed[0].contains("[Object]"), "{}", printed[0]);
    assert!(printed[0].starts_with("{ a: 1, me: "), "{}", printed[0]);
}

#[test]
fn declare_on_assign_is_not_strict() {
    assert_eq!(
        logs("function f() { made = 'here'; return made; } print f();"),
        vec!["here"]
    );
}

#[test]
fn comments_and_optional_semicolons() {
    let source = "
        >! block
           comment !<
        var a = 1 >> trailing
        print a
    ";
    assert_eq!(logs(source), vec!["1"]);
}

#[test]
fn instance_counter_program() {
    let source = "
        class Account {
            private balance;
            public owner;
            constructor(owner) { this.owner = owner; this.balance = 0; }
            deposit(n) { this.balance = this.balance + n; return this; }
            total() { return this.balance; }
            static bank() { return 'bramble'; }
        }
        var a = new Account('ann');
        var b = new Account('bob');
        a.deposit(5); a.deposit(7); b.deposit(1);
        print a.owner, '=', a.total(), ' ', b.owner, '=', b.total();
        print a.bank();
    ";
    assert_eq!(logs(source), vec!["ann=12 bob=1", "bramble"]);
}

#[test]
fn fizzbuzz() {
    let source = "
        for (var i = 1; i <= 15; i = i + 1) {
            if (i % 15 == 0) { print 'FizzBuzz'; }
            else if (i % 3 == 0) { print 'Fizz'; }
            else if (i % 5 == 0) { print 'Buzz'; }
        }
    ";
    assert_eq!(logs(source), vec!["Fizz", "Buzz", "Fizz", "Fizz", "Buzz", "FizzBuzz"]);
}

#[test]
fn recursion_within_limit() {
    let source = "
        function fib(n) { if (n < 2) { return n; } return fib(n - 1) + fib(n - 2); }
        print fib(15);
    ";
    assert_eq!(logs(source), vec!["610"]);
}

#[test]
fn natives_in_programs() {
    let source = "
        var r = random(3, 3);
        print tostring(r, '!');
        print tonumber('1', '5') * 2;
        print utility.time() > 0;
    ";
    assert_eq!(logs(source), vec!["3!", "30", "true"]);
}

#[test]
fn silent_mode_still_collects_the_log() {
    let config = RunConfig {
        print: PrintMode::Silent,
        ..RunConfig::default()
    };
    let outcome = run_source("print 'quiet'; 1 + 1", &config).unwrap();
    assert_eq!(outcome.logs, vec!["quiet"]);
    assert_eq!(outcome.value.as_number(), Some(2.0));
}

#[test]
fn default_config_prints_to_stdout() {
    let config = RunConfig::default();
    assert_eq!(config.print, PrintMode::Stdout);
    assert_eq!(config.max_call_depth, DEFAULT_MAX_CALL_DEPTH);
}
