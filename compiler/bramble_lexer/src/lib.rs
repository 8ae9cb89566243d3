//! Lexer for Bramble using logos.
//!
//! [`lex`] turns source text into a [`TokenList`] that always ends with a
//! single `Eof` token. Comments and whitespace are dropped. The first
//! malformed token aborts lexing.

mod lex_error;
mod raw_token;

use bramble_ir::{Span, Token, TokenKind, TokenList};
use logos::Logos;

pub use lex_error::{LexError, LexErrorKind};
use raw_token::{RawError, RawToken};

/// Lex source code into a list of tokens.
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let mut result = TokenList::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        match token_result {
            Ok(raw) => {
                if let Some((kind, text)) = convert_token(raw, slice) {
                    result.push(Token::new(kind, text, span));
                }
            }
            Err(RawError::Kind(kind)) => return Err(LexError::new(kind, span)),
            Err(RawError::Unrecognized) => {
                let found = slice.chars().next().unwrap_or_default();
                return Err(LexError::new(
                    LexErrorKind::UnexpectedCharacter { found },
                    span,
                ));
            }
        }
    }

    let eof = Span::from_range(source.len()..source.len());
    result.push(Token::new(TokenKind::Eof, "", eof));
    Ok(result)
}

/// Convert a raw token to its kind and text. Comments yield `None`.
fn convert_token(raw: RawToken, slice: &str) -> Option<(TokenKind, String)> {
    let kind = match raw {
        RawToken::LineComment | RawToken::BlockComment => return None,

        RawToken::Number(digits) => return Some((TokenKind::Number, digits)),
        RawToken::String(body) => return Some((TokenKind::String, body)),
        RawToken::Ident => TokenKind::Ident,

        RawToken::Var => TokenKind::Var,
        RawToken::Local => TokenKind::Local,
        RawToken::Global => TokenKind::Global,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::None => TokenKind::None,
        RawToken::Print => TokenKind::Print,
        RawToken::Function => TokenKind::Function,
        RawToken::Return => TokenKind::Return,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::Do => TokenKind::Do,
        RawToken::Static => TokenKind::Static,
        RawToken::Public => TokenKind::Public,
        RawToken::Private => TokenKind::Private,
        RawToken::Readonly => TokenKind::Readonly,
        RawToken::Constructor => TokenKind::Constructor,
        RawToken::New => TokenKind::New,
        RawToken::Class => TokenKind::Class,
        RawToken::While => TokenKind::While,
        RawToken::For => TokenKind::For,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Colon => TokenKind::Colon,

        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::StarStar => TokenKind::StarStar,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::Eq => TokenKind::Eq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Bang => TokenKind::Bang,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
    };
    Some((kind, slice.to_string()))
}
