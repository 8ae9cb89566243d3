//! Lexer error types.

use std::fmt;

use bramble_ir::Span;

/// A lexer error: what went wrong and where.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// End of input inside a string literal.
    UnterminatedString,
    /// A string opened with one quote style and closed with the other.
    MismatchedQuote { expected: char, found: char },
    /// `>!` without a matching `!<`.
    UnterminatedComment,
    /// A number with a second decimal point.
    MalformedNumber,
    /// A character that starts no token. Covers a lone `&` or `|`.
    UnexpectedCharacter { found: char },
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            LexErrorKind::MismatchedQuote { expected, found } => write!(
                f,
                "expected string to end with {expected}, instead got {found}"
            ),
            LexErrorKind::UnterminatedComment => {
                write!(f, "block comment must be ended with `!<`")
            }
            LexErrorKind::MalformedNumber => {
                write!(f, "a number cannot have more than one decimal point")
            }
            LexErrorKind::UnexpectedCharacter { found: c @ ('&' | '|') } => write!(
                f,
                "unexpected character `{c}`, it can only be followed by another `{c}`"
            ),
            LexErrorKind::UnexpectedCharacter { found } => {
                write!(f, "unexpected character `{found}`")
            }
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

impl std::error::Error for LexError {}
