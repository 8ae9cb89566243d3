//! Expression parsing.
//!
//! Precedence, lowest to highest:
//!
//! `new` → `do` → `=` → `||` → `&&` → `==` `!=` → `<` `<=` `>` `>=` →
//! object/array literal → `+` `-` → `*` `/` `%` → `**` → unary `-` `!` →
//! call/member → primary
//!
//! # Module Structure
//!
//! - `mod.rs`: entry point (`parse_expr`) and the binary precedence chain
//! - `operators.rs`: operator matching helpers
//! - `postfix.rs`: calls, `.name` and `[expr]`
//! - `primary.rs`: literals, identifiers, grouping, `...name`, `function`

mod operators;
mod postfix;
mod primary;

use bramble_ir::{BinaryOp, Expr, LogicalOp, TokenKind};
use bramble_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse an expression.
    ///
    /// Uses `ensure_sufficient_stack` to prevent stack overflow
    /// on deeply nested expressions.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_new())
    }

    /// `new Name(args)`
    fn parse_new(&mut self) -> Result<Expr, ParseError> {
        if !self.cursor.eat(TokenKind::New) {
            return self.parse_do();
        }
        let class = self.cursor.expect_ident()?;
        let args = self.parse_args()?;
        Ok(Expr::New { class, args })
    }

    /// `do { ... }`
    fn parse_do(&mut self) -> Result<Expr, ParseError> {
        if !self.cursor.check(TokenKind::Do) {
            return self.parse_assignment();
        }
        self.cursor.advance();
        Ok(Expr::Do(self.parse_block()?))
    }

    /// `target = value`, right-associative.
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let target = self.parse_binary_or()?;
        if self.cursor.eat(TokenKind::Eq) {
            let value = self.parse_expr()?;
            return Ok(Expr::Assign {
                target: Box::new(target),
                value: Box::new(value),
            });
        }
        Ok(target)
    }

    /// Parse `||` (lowest precedence binary).
    fn parse_binary_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_binary_and()?;
        while self.cursor.eat(TokenKind::PipePipe) {
            let right = self.parse_binary_and()?;
            left = Expr::logical(LogicalOp::Or, left, right);
        }
        Ok(left)
    }

    /// Parse `&&`.
    fn parse_binary_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_binary_eq()?;
        while self.cursor.eat(TokenKind::AmpAmp) {
            let right = self.parse_binary_eq()?;
            left = Expr::logical(LogicalOp::And, left, right);
        }
        Ok(left)
    }

    /// Parse `==` and `!=`.
    fn parse_binary_eq(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_binary_cmp()?;
        while let Some(op) = self.match_equality_op() {
            self.cursor.advance();
            let right = self.parse_binary_cmp()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    /// Parse `<`, `<=`, `>` and `>=`.
    fn parse_binary_cmp(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_literal_or_additive()?;
        while let Some(op) = self.match_comparison_op() {
            self.cursor.advance();
            let right = self.parse_literal_or_additive()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    /// Object and array literals bind here; the literal is the whole operand.
    fn parse_literal_or_additive(&mut self) -> Result<Expr, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::LBrace => self.parse_object_literal(),
            TokenKind::LBracket => self.parse_array_literal(),
            _ => self.parse_binary_additive(),
        }
    }

    /// Parse `+` and `-`.
    fn parse_binary_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_binary_mul()?;
        while let Some(op) = self.match_additive_op() {
            self.cursor.advance();
            let right = self.parse_binary_mul()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    /// Parse `*`, `/` and `%`.
    fn parse_binary_mul(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_power()?;
        while let Some(op) = self.match_multiplicative_op() {
            self.cursor.advance();
            let right = self.parse_power()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    /// Parse `**`, right-associative.
    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_unary()?;
        if self.cursor.eat(TokenKind::StarStar) {
            let exponent = ensure_sufficient_stack(|| self.parse_power())?;
            return Ok(Expr::binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    /// Parse prefix `-` and `!`, right-associative.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(op) = self.match_unary_op() {
            self.cursor.advance();
            let operand = ensure_sufficient_stack(|| self.parse_unary())?;
            return Ok(Expr::unary(op, operand));
        }
        self.parse_postfix()
    }

    /// Comma-separated expressions, stopping after a `...name` entry.
    pub(crate) fn parse_expr_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut items = vec![self.parse_expr()?];
        while !matches!(items.last(), Some(Expr::Infinite(_)))
            && self.cursor.eat(TokenKind::Comma)
        {
            items.push(self.parse_expr()?);
        }
        Ok(items)
    }

    /// `( [expr (, expr)*] )`
    pub(crate) fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.cursor.expect(TokenKind::LParen)?;
        if self.cursor.eat(TokenKind::RParen) {
            return Ok(Vec::new());
        }
        let args = self.parse_expr_list()?;
        self.cursor.expect(TokenKind::RParen)?;
        Ok(args)
    }
}
