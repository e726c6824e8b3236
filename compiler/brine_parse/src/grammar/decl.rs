//! Declarations, types, function literals and class definitions.

use crate::{ParseError, ParseErrorKind, Parser};
use brine_ir::{
    ClassDef, DeclFlags, Declaration, Expr, ExprItem, FunctionDef, Param, Pos, Stmt, StmtKind,
    TokenKind, TypeName,
};
use std::rc::Rc;

impl Parser<'_> {
    /// Number of tokens the type starting `offset` tokens ahead spans.
    fn type_len_at(&self, offset: usize) -> Option<usize> {
        if !matches!(
            self.cursor.peek_kind(offset),
            TokenKind::Ident(_) | TokenKind::Func | TokenKind::Class
        ) {
            return None;
        }
        let mut len = 1;
        while matches!(self.cursor.peek_kind(offset + len), TokenKind::LBracket)
            && matches!(self.cursor.peek_kind(offset + len + 1), TokenKind::RBracket)
        {
            len += 2;
        }
        Some(len)
    }

    /// `[const] [alloc] [ref] TYPE NAME` ahead?
    pub(crate) fn at_declaration(&self) -> bool {
        if matches!(
            self.cursor.current_kind(),
            TokenKind::Const | TokenKind::Alloc | TokenKind::Ref
        ) {
            return true;
        }
        match self.type_len_at(0) {
            Some(len) => matches!(self.cursor.peek_kind(len), TokenKind::Ident(_)),
            None => false,
        }
    }

    /// `func name(` or `closure func name(` ahead?
    pub(crate) fn at_function_definition(&self) -> bool {
        let skip = usize::from(matches!(self.cursor.current_kind(), TokenKind::Closure));
        matches!(self.cursor.peek_kind(skip), TokenKind::Func)
            && matches!(self.cursor.peek_kind(skip + 1), TokenKind::Ident(_))
            && matches!(self.cursor.peek_kind(skip + 2), TokenKind::LParen)
    }

    /// `class Name {` ahead?
    pub(crate) fn at_class_definition(&self) -> bool {
        matches!(self.cursor.current_kind(), TokenKind::Class)
            && matches!(self.cursor.peek_kind(1), TokenKind::Ident(_))
            && matches!(self.cursor.peek_kind(2), TokenKind::LBrace)
    }

    pub(crate) fn parse_type(&mut self) -> Result<TypeName, ParseError> {
        let token = self.cursor.current();
        let mut ty = match &token.kind {
            TokenKind::Ident(name) => TypeName::new(name),
            TokenKind::Func => TypeName::new("func"),
            TokenKind::Class => TypeName::new("class"),
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedType(other.describe()),
                    token.pos.line,
                ))
            }
        };
        self.cursor.advance();
        while self.cursor.check(&TokenKind::LBracket)
            && matches!(self.cursor.peek_kind(1), TokenKind::RBracket)
        {
            self.cursor.advance();
            self.cursor.advance();
            ty = TypeName::array_of(&ty);
        }
        Ok(ty)
    }

    /// Declaration without its terminating `;`.
    pub(crate) fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let mut flags = DeclFlags::empty();
        loop {
            let flag = match self.cursor.current_kind() {
                TokenKind::Const => DeclFlags::CONST,
                TokenKind::Alloc => DeclFlags::ALLOC,
                TokenKind::Ref => DeclFlags::REF,
                _ => break,
            };
            self.cursor.advance();
            flags |= flag;
        }

        let ty = self.parse_type()?;
        let name = self.cursor.expect_ident()?;
        let init = if self.cursor.eat(&TokenKind::Eq) {
            Some(self.parse_lowered_expr()?)
        } else {
            None
        };

        Ok(Declaration {
            ty,
            name,
            flags,
            init,
        })
    }

    /// `[ref] TYPE NAME`
    fn parse_param(&mut self) -> Result<Param, ParseError> {
        let is_ref = self.cursor.eat(&TokenKind::Ref);
        let ty = self.parse_type()?;
        let name = self.cursor.expect_ident()?;
        Ok(Param { name, ty, is_ref })
    }

    /// `[closure] func (params) [-> [ref] TYPE] { body }`
    ///
    /// Without an arrow the return type is `var`.
    pub(crate) fn parse_function_literal(&mut self) -> Result<FunctionDef, ParseError> {
        let pos = self.cursor.current_pos();
        let captures = self.cursor.eat(&TokenKind::Closure);
        self.cursor.expect(&TokenKind::Func)?;
        self.parse_function_rest(captures, pos)
    }

    /// Everything after `func` (and the name, for definitions).
    fn parse_function_rest(
        &mut self,
        captures: bool,
        pos: Pos,
    ) -> Result<FunctionDef, ParseError> {
        self.cursor.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.cursor.eat(&TokenKind::RParen) {
            loop {
                params.push(self.parse_param()?);
                if self.cursor.eat(&TokenKind::RParen) {
                    break;
                }
                self.cursor.expect(&TokenKind::Comma)?;
            }
        }

        let (return_type, returns_ref) = if self.cursor.eat(&TokenKind::Arrow) {
            let returns_ref = self.cursor.eat(&TokenKind::Ref);
            (self.parse_type()?, returns_ref)
        } else {
            (TypeName::var(), false)
        };

        if !self.cursor.check(&TokenKind::LBrace) {
            return Err(ParseError::expected_kind(
                &TokenKind::LBrace,
                self.cursor.current(),
            ));
        }
        let body = self.parse_stmt()?;

        Ok(FunctionDef {
            params,
            return_type,
            returns_ref,
            captures,
            body,
            pos,
        })
    }

    /// `[closure] func name(params) -> T { body }`, sugar for a constant
    /// `func` declaration initialized with a function literal.
    pub(crate) fn parse_function_definition(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.cursor.current_pos();
        let captures = self.cursor.eat(&TokenKind::Closure);
        self.cursor.expect(&TokenKind::Func)?;
        let name = self.cursor.expect_ident()?;
        let def = self.parse_function_rest(captures, pos)?;
        tracing::trace!(%name, params = def.params.len(), "function definition");

        let init = Expr::new(vec![ExprItem::Function(Rc::new(def))], pos);
        Ok(Stmt::new(
            StmtKind::Decl(Declaration {
                ty: TypeName::new("func"),
                name,
                flags: DeclFlags::CONST,
                init: Some(init),
            }),
            pos,
        ))
    }

    /// `class Name { [ref] TYPE member; ... }`
    pub(crate) fn parse_class_definition(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.cursor.current_pos();
        self.cursor.expect(&TokenKind::Class)?;
        let name = self.cursor.expect_ident()?;
        self.cursor.expect(&TokenKind::LBrace)?;

        let mut members = Vec::new();
        while !self.cursor.eat(&TokenKind::RBrace) {
            members.push(self.parse_param()?);
            self.cursor.expect(&TokenKind::Semicolon)?;
        }
        self.cursor.eat(&TokenKind::Semicolon);

        Ok(Stmt::new(
            StmtKind::Class(Rc::new(ClassDef {
                name,
                members: Rc::from(members),
            })),
            pos,
        ))
    }
}
