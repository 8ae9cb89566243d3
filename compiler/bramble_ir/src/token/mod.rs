//! Token types produced by the lexer and consumed by the parser.

mod kind;
mod list;

pub use kind::TokenKind;
pub use list::TokenList;

use super::Span;
use std::fmt;

/// A token with its literal text and its span in the source.
///
/// `text` holds the identifier or keyword spelling, the string body without
/// quotes, or the number with `_` separators already removed.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {}", self.kind, self.text, self.span)
    }
}
