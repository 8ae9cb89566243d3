use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_params_display() {
    let params = Params::new(vec!["a".into(), "b".into()], None);
    assert_eq!(params.to_string(), "a,b");
    assert_eq!(params.min_arity(), 2);

    let variadic = Params::new(vec!["a".into()], Some("rest".into()));
    assert_eq!(variadic.to_string(), "a,...");
    assert_eq!(variadic.min_arity(), 1);

    let only_rest = Params::new(vec![], Some("rest".into()));
    assert_eq!(only_rest.to_string(), "...");
    assert_eq!(Params::default().to_string(), "");
}

#[test]
fn test_operator_symbols() {
    assert_eq!(BinaryOp::Pow.as_symbol(), "**");
    assert_eq!(BinaryOp::NotEq.as_symbol(), "!=");
    assert_eq!(LogicalOp::Or.as_symbol(), "||");
    assert_eq!(UnaryOp::Not.as_symbol(), "!");
}

#[test]
fn test_class_member_accessors() {
    let field = ClassMember::Field(ClassField {
        name: "secret".into(),
        is_private: true,
        is_readonly: false,
        value: None,
    });
    assert_eq!(field.name(), "secret");
    assert!(field.is_private());
}
