//! Statement parsing.

use std::rc::Rc;

use bramble_ir::ast::{ForStmt, FunctionDecl, IfStmt, LoopCounter, Params, VarDecl, WhileStmt};
use bramble_ir::{Expr, Stmt, TokenKind};
use tracing::trace;

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// Parse one statement, dispatching on the leading token.
    ///
    /// A trailing `;` after a declaration, `print`, `return` or expression
    /// statement is optional and consumed here.
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let kind = self.cursor.current_kind();
        trace!(pos = self.cursor.position(), kind = kind.display_name(), "parse_stmt");

        let stmt = match kind {
            TokenKind::Var | TokenKind::Local | TokenKind::Global => {
                Stmt::VarDecl(self.parse_var_decl()?)
            }
            TokenKind::Print => self.parse_print()?,
            TokenKind::Return => self.parse_return()?,
            TokenKind::Function => return Ok(Stmt::Function(self.parse_function()?)),
            TokenKind::If => return Ok(Stmt::If(self.parse_if()?)),
            TokenKind::While => return self.parse_while(),
            TokenKind::For => return self.parse_for(),
            TokenKind::Class => return self.parse_class(),
            TokenKind::LBrace => return Ok(Stmt::Block(self.parse_block()?)),
            _ => Stmt::Expr(self.parse_expr()?),
        };

        self.cursor.eat(TokenKind::Semicolon);
        Ok(stmt)
    }

    /// `{ stmt* }`
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.cursor.expect(TokenKind::LBrace)?;
        let mut body = Vec::new();
        while !self.cursor.is_at_end() && !self.cursor.check(TokenKind::RBrace) {
            body.push(self.parse_stmt()?);
        }
        self.cursor.expect(TokenKind::RBrace)?;
        Ok(body)
    }

    /// `global name [= value]`, `local name [= value]`,
    /// `var [: scope] name [= value]`.
    fn parse_var_decl(&mut self) -> Result<VarDecl, ParseError> {
        let keyword = self.cursor.advance().kind;
        let global = keyword == TokenKind::Global;

        let scope = if keyword == TokenKind::Var && self.cursor.eat(TokenKind::Colon) {
            Some(self.cursor.expect_ident()?)
        } else {
            None
        };

        let name = self.cursor.expect_ident()?;
        let value = if self.cursor.eat(TokenKind::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        Ok(VarDecl {
            name,
            global,
            value,
            scope,
        })
    }

    /// `print expr (, expr)*`
    fn parse_print(&mut self) -> Result<Stmt, ParseError> {
        self.cursor.expect(TokenKind::Print)?;
        let output = self.parse_expr_list()?;
        Ok(Stmt::Print(output))
    }

    /// `return [expr]`; the value is omitted before `;`, `}` or end of input.
    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        self.cursor.expect(TokenKind::Return)?;
        if matches!(
            self.cursor.current_kind(),
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        ) {
            return Ok(Stmt::Return(None));
        }
        Ok(Stmt::Return(Some(self.parse_expr()?)))
    }

    /// `function [name] (params) { body }`
    pub(crate) fn parse_function(&mut self) -> Result<Rc<FunctionDecl>, ParseError> {
        self.cursor.expect(TokenKind::Function)?;
        let name = if self.cursor.check(TokenKind::Ident) {
            Some(self.cursor.advance().text.clone())
        } else {
            None
        };
        let params = self.parse_params()?;
        let body = self.parse_block()?;
        Ok(Rc::new(FunctionDecl {
            name,
            params,
            body: body.into(),
        }))
    }

    /// `( name, name, ...rest )`. The variadic marker must come last.
    pub(crate) fn parse_params(&mut self) -> Result<Params, ParseError> {
        self.cursor.expect(TokenKind::LParen)?;
        let mut params = Params::default();

        if self.cursor.eat(TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            match self.cursor.current_kind() {
                TokenKind::Ident => {
                    params.names.push(self.cursor.advance().text.clone());
                }
                TokenKind::Ellipsis => {
                    self.cursor.advance();
                    params.variadic = Some(self.cursor.expect_ident()?);
                    break;
                }
                found => {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidParameter { found },
                        self.cursor.current_span(),
                    ));
                }
            }
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }

        self.cursor.expect(TokenKind::RParen)?;
        Ok(params)
    }

    /// `if (cond) { ... } [else { ... } | else stmt]`
    fn parse_if(&mut self) -> Result<IfStmt, ParseError> {
        self.cursor.expect(TokenKind::If)?;
        self.cursor.expect(TokenKind::LParen)?;
        let condition = self.parse_expr()?;
        self.cursor.expect(TokenKind::RParen)?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.cursor.eat(TokenKind::Else) {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };

        Ok(IfStmt {
            condition,
            then_branch,
            else_branch,
        })
    }

    /// `while (cond [; var|local name [= number]]) { ... }`
    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        self.cursor.expect(TokenKind::While)?;
        self.cursor.expect(TokenKind::LParen)?;
        let condition = self.parse_expr()?;

        let counter = if self.cursor.eat(TokenKind::Semicolon) {
            if !matches!(
                self.cursor.current_kind(),
                TokenKind::Var | TokenKind::Local
            ) {
                return Err(self.cursor.unexpected("`var` or `local` loop counter"));
            }
            let span = self.cursor.current_span();
            let decl = self.parse_var_decl()?;
            let start = match decl.value {
                None => 0.0,
                Some(Expr::Number(n)) => n,
                Some(_) => {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidWhileCounter,
                        span.merge(self.cursor.current_span()),
                    ))
                }
            };
            Some(LoopCounter {
                name: decl.name,
                start,
            })
        } else {
            None
        };

        self.cursor.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        Ok(Stmt::While(WhileStmt {
            condition,
            counter,
            body,
        }))
    }

    /// `for (init; cond; update) { ... }`. A declared counter without a
    /// value starts at `0`.
    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        self.cursor.expect(TokenKind::For)?;
        self.cursor.expect(TokenKind::LParen)?;

        if self.cursor.check(TokenKind::Semicolon) {
            return Err(self.cursor.unexpected("a for loop initializer"));
        }
        let mut init = self.parse_stmt()?;
        if let Stmt::VarDecl(decl) = &mut init {
            decl.value.get_or_insert(Expr::Number(0.0));
        }

        if self.cursor.check(TokenKind::Semicolon) {
            return Err(self.cursor.unexpected("a for loop condition"));
        }
        let condition = self.parse_expr()?;
        self.cursor.eat(TokenKind::Semicolon);

        if self.cursor.check(TokenKind::Semicolon) {
            return Err(self.cursor.unexpected("a for loop incrementor"));
        }
        let update = self.parse_expr()?;
        self.cursor.eat(TokenKind::Semicolon);

        self.cursor.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        Ok(Stmt::For(ForStmt {
            init: Box::new(init),
            condition,
            update,
            body,
        }))
    }
}
