//! Parse error types.

use std::fmt;

use bramble_ir::{Span, TokenKind};

/// The first malformed construct in the input, with the offending span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// `expected` describes what the grammar wanted at this point.
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
    },
    MultipleConstructors,
    PrivateConstructor,
    /// A `readonly` class field; such fields would need a value.
    ReadonlyField,
    /// `name = value` inside a class body.
    FieldInitializer,
    /// A parameter that is neither an identifier nor a trailing `...name`.
    InvalidParameter { found: TokenKind },
    /// `while (cond; var i = x)` where `x` is not a numeric literal.
    InvalidWhileCounter,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ParseErrorKind::MultipleConstructors => {
                write!(f, "only one constructor can be provided within a class body")
            }
            ParseErrorKind::PrivateConstructor => {
                write!(f, "constructors of a class cannot be private")
            }
            ParseErrorKind::ReadonlyField => {
                write!(f, "readonly fields must be assigned a value")
            }
            ParseErrorKind::FieldInitializer => write!(
                f,
                "class fields can only have their value set in the constructor"
            ),
            ParseErrorKind::InvalidParameter { found } => write!(
                f,
                "expected a parameter name or `...name`, found {found}"
            ),
            ParseErrorKind::InvalidWhileCounter => {
                write!(f, "a while loop counter can only start at a number literal")
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

impl std::error::Error for ParseError {}
