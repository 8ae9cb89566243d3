//! Recursive descent parser for Bramble.
//!
//! Single pass with one token of lookahead and no error recovery: the first
//! malformed construct aborts with a [`ParseError`].

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};

use bramble_ir::{Program, TokenList};
use tracing::debug;

/// Parser state: a cursor over the token stream.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens.as_slice()),
        }
    }

    /// Parse every statement up to `Eof`.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut body = Vec::new();
        while !self.cursor.is_at_end() {
            body.push(self.parse_stmt()?);
        }
        debug!(statements = body.len(), "parsed program");
        Ok(Program::new(body))
    }
}

/// Parse a token list into a program.
pub fn parse(tokens: &TokenList) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

#[cfg(test)]
mod tests;
