//! Primary expressions and collection literals.

use bramble_ir::ast::ObjectProperty;
use bramble_ir::{Expr, TokenKind};
use tracing::trace;

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current();
        trace!(kind = token.kind.display_name(), "parse_primary");

        match token.kind {
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                self.cursor.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Ellipsis => {
                self.cursor.advance();
                Ok(Expr::Infinite(self.cursor.expect_ident()?))
            }
            TokenKind::Number => {
                self.cursor.advance();
                Ok(Expr::Number(token.text.parse().unwrap_or(f64::NAN)))
            }
            TokenKind::String => {
                self.cursor.advance();
                Ok(Expr::Str(token.text.clone()))
            }
            TokenKind::Ident => {
                self.cursor.advance();
                Ok(Expr::Ident(token.text.clone()))
            }
            TokenKind::True => {
                self.cursor.advance();
                Ok(Expr::Bool(true))
            }
            TokenKind::False => {
                self.cursor.advance();
                Ok(Expr::Bool(false))
            }
            TokenKind::None => {
                self.cursor.advance();
                Ok(Expr::None)
            }
            TokenKind::LBrace => self.parse_object_literal(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::Function => Ok(Expr::Function(self.parse_function()?)),
            _ => Err(self.cursor.unexpected("an expression")),
        }
    }

    /// `{ key, key: value, ... }`. Keys are any single token's text.
    pub(crate) fn parse_object_literal(&mut self) -> Result<Expr, ParseError> {
        self.cursor.expect(TokenKind::LBrace)?;
        let mut properties = Vec::new();

        while !self.cursor.is_at_end() && !self.cursor.check(TokenKind::RBrace) {
            let key = self.cursor.advance().text.clone();
            match self.cursor.current_kind() {
                TokenKind::Comma => {
                    self.cursor.advance();
                    properties.push(ObjectProperty { key, value: None });
                }
                TokenKind::RBrace => properties.push(ObjectProperty { key, value: None }),
                TokenKind::Colon => {
                    self.cursor.advance();
                    let value = self.parse_expr()?;
                    properties.push(ObjectProperty {
                        key,
                        value: Some(value),
                    });
                    if !self.cursor.check(TokenKind::RBrace) {
                        self.cursor.expect(TokenKind::Comma)?;
                    }
                }
                _ => return Err(self.cursor.unexpected("`,`, `:` or `}` after an object key")),
            }
        }

        self.cursor.expect(TokenKind::RBrace)?;
        Ok(Expr::Object(properties))
    }

    /// `[ expr, expr, ... ]`
    pub(crate) fn parse_array_literal(&mut self) -> Result<Expr, ParseError> {
        self.cursor.expect(TokenKind::LBracket)?;
        let mut elements = Vec::new();

        while !self.cursor.is_at_end() && !self.cursor.check(TokenKind::RBracket) {
            elements.push(self.parse_expr()?);
            if !self.cursor.check(TokenKind::RBracket) {
                self.cursor.expect(TokenKind::Comma)?;
            }
        }

        self.cursor.expect(TokenKind::RBracket)?;
        Ok(Expr::Array(elements))
    }
}
