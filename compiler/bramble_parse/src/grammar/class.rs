//! Class declarations.

use bramble_ir::ast::{ClassDecl, ClassField, ClassMember, ClassMethod, ConstructorDecl};
use bramble_ir::{Stmt, TokenKind};
use tracing::trace;

use crate::{ParseError, ParseErrorKind, Parser};

/// Modifiers seen before a member, in any order.
#[derive(Default)]
struct Modifiers {
    is_private: bool,
    is_readonly: bool,
    is_static: bool,
}

impl Parser<'_> {
    /// `class Name { member* }`
    pub(crate) fn parse_class(&mut self) -> Result<Stmt, ParseError> {
        self.cursor.expect(TokenKind::Class)?;
        let name = self.cursor.expect_ident()?;
        self.cursor.expect(TokenKind::LBrace)?;

        let mut decl = ClassDecl {
            name,
            constructor: None,
            public: Vec::new(),
            private: Vec::new(),
        };

        while !self.cursor.is_at_end() && !self.cursor.check(TokenKind::RBrace) {
            self.parse_class_member(&mut decl)?;
        }

        self.cursor.expect(TokenKind::RBrace)?;
        trace!(class = %decl.name, "parsed class");
        Ok(Stmt::Class(decl))
    }

    fn parse_modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::default();
        loop {
            match self.cursor.current_kind() {
                TokenKind::Public => {}
                TokenKind::Private => modifiers.is_private = true,
                TokenKind::Readonly => modifiers.is_readonly = true,
                TokenKind::Static => modifiers.is_static = true,
                _ => return modifiers,
            }
            self.cursor.advance();
        }
    }

    fn parse_class_member(&mut self, decl: &mut ClassDecl) -> Result<(), ParseError> {
        let modifiers = self.parse_modifiers();

        if self.cursor.check(TokenKind::Constructor) {
            let span = self.cursor.current_span();
            if decl.constructor.is_some() {
                return Err(ParseError::new(ParseErrorKind::MultipleConstructors, span));
            }
            if modifiers.is_private {
                return Err(ParseError::new(ParseErrorKind::PrivateConstructor, span));
            }
            self.cursor.advance();
            let params = self.parse_params()?;
            let body = self.parse_block()?;
            decl.constructor = Some(ConstructorDecl {
                params,
                body: body.into(),
            });
            return Ok(());
        }

        if !self.cursor.check(TokenKind::Ident) {
            return Err(self.cursor.unexpected("a member name or `constructor`"));
        }
        let name_token = self.cursor.advance();
        let name = name_token.text.clone();

        let member = match self.cursor.current_kind() {
            TokenKind::Eq => {
                return Err(ParseError::new(
                    ParseErrorKind::FieldInitializer,
                    name_token.span.merge(self.cursor.current_span()),
                ));
            }
            TokenKind::LParen => {
                let params = self.parse_params()?;
                let body = self.parse_block()?;
                ClassMember::Method(ClassMethod {
                    name,
                    params,
                    body: body.into(),
                    is_static: modifiers.is_static,
                    is_private: modifiers.is_private,
                })
            }
            _ => {
                if modifiers.is_readonly {
                    return Err(ParseError::new(
                        ParseErrorKind::ReadonlyField,
                        name_token.span,
                    ));
                }
                self.cursor.eat(TokenKind::Semicolon);
                ClassMember::Field(ClassField {
                    name,
                    is_private: modifiers.is_private,
                    is_readonly: false,
                    value: None,
                })
            }
        };

        trace!(member = member.name(), private = member.is_private(), "class member");
        if member.is_private() {
            decl.private.push(member);
        } else {
            decl.public.push(member);
        }
        Ok(())
    }
}
