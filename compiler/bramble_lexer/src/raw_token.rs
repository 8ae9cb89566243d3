//! Raw tokens recognised by logos, before conversion to `TokenKind`.

use logos::{Lexer, Logos};

use crate::LexErrorKind;

/// Error produced inside logos callbacks.
///
/// `Unrecognized` is what logos reports for input no pattern matches; the
/// converter turns it into `UnexpectedCharacter` with the offending char.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) enum RawError {
    #[default]
    Unrecognized,
    Kind(LexErrorKind),
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = RawError)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    #[regex(r">>[^\n]*")]
    LineComment,

    #[token(">!", block_comment)]
    BlockComment,

    // Keywords
    #[token("var")]
    Var,
    #[token("local")]
    Local,
    #[token("global")]
    Global,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("none")]
    None,
    #[token("print")]
    Print,
    #[token("function")]
    Function,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("do")]
    Do,
    #[token("static")]
    Static,
    #[token("public")]
    Public,
    #[token("private")]
    Private,
    #[token("readonly")]
    Readonly,
    #[token("constructor")]
    Constructor,
    #[token("new")]
    New,
    #[token("class")]
    Class,
    #[token("while")]
    While,
    #[token("for")]
    For,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("...")]
    Ellipsis,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("**")]
    StarStar,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("!")]
    Bang,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,

    // Literals
    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?", number)]
    Number(String),

    #[regex(r#"["'][^"']*"#, string)]
    String(String),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Skip to just past the closing `!<`.
fn block_comment(lex: &mut Lexer<'_, RawToken>) -> Result<(), RawError> {
    match lex.remainder().find("!<") {
        Some(end) => {
            lex.bump(end + 2);
            Ok(())
        }
        None => {
            lex.bump(lex.remainder().len());
            Err(RawError::Kind(LexErrorKind::UnterminatedComment))
        }
    }
}

/// Number text with `_` separators removed. A decimal point following a
/// fractional part is rejected.
fn number(lex: &mut Lexer<'_, RawToken>) -> Result<String, RawError> {
    let slice = lex.slice();
    if slice.contains('.') && lex.remainder().starts_with('.') {
        lex.bump(1);
        return Err(RawError::Kind(LexErrorKind::MalformedNumber));
    }
    let mut digits: String = slice.chars().filter(|&c| c != '_').collect();
    if digits.ends_with('.') {
        digits.push('0');
    }
    Ok(digits)
}

/// The regex stops before the first quote of either kind; the closing quote
/// must match the opening one.
fn string(lex: &mut Lexer<'_, RawToken>) -> Result<String, RawError> {
    let slice = lex.slice();
    let open = slice.chars().next().unwrap_or('"');
    let body = slice[open.len_utf8()..].to_string();

    let Some(close) = lex.remainder().chars().next() else {
        return Err(RawError::Kind(LexErrorKind::UnterminatedString));
    };
    lex.bump(close.len_utf8());

    if close == open {
        Ok(body)
    } else {
        Err(RawError::Kind(LexErrorKind::MismatchedQuote {
            expected: open,
            found: close,
        }))
    }
}
