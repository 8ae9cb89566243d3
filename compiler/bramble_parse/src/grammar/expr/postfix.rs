//! Calls and member access.

use bramble_ir::{Expr, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Primary followed by any chain of `.name`, `[expr]` and `(args)`.
    pub(crate) fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.cursor.current_kind() {
                TokenKind::Dot => {
                    self.cursor.advance();
                    let name = self.cursor.expect_ident()?;
                    expr = Expr::member(expr, Expr::Ident(name), false);
                }
                TokenKind::LBracket => {
                    self.cursor.advance();
                    let property = self.parse_expr()?;
                    self.cursor.expect(TokenKind::RBracket)?;
                    expr = Expr::member(expr, property, true);
                }
                TokenKind::LParen => {
                    let args = self.parse_args()?;
                    expr = Expr::call(expr, args);
                }
                _ => return Ok(expr),
            }
        }
    }
}
