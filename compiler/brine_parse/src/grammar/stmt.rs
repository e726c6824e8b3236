//! Statement parsing.

use super::expr::{lower, Node};
use crate::{ParseError, ParseErrorKind, Parser};
use brine_ir::{Expr, Pos, Stmt, StmtKind, TokenKind};
use brine_stack::ensure_sufficient_stack;

impl Parser<'_> {
    /// Parse one statement, including its terminator.
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        ensure_sufficient_stack(|| self.parse_stmt_inner())
    }

    fn parse_stmt_inner(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.cursor.current_pos();
        let kind = match self.cursor.current_kind() {
            TokenKind::LBrace => self.parse_compound()?,
            TokenKind::If => self.parse_if()?,
            TokenKind::While => self.parse_while()?,
            TokenKind::For => self.parse_for()?,
            TokenKind::Break => {
                self.cursor.advance();
                self.cursor.expect(&TokenKind::Semicolon)?;
                StmtKind::Break
            }
            TokenKind::Continue => {
                self.cursor.advance();
                self.cursor.expect(&TokenKind::Semicolon)?;
                StmtKind::Continue
            }
            TokenKind::Return => {
                self.cursor.advance();
                let value = if self.cursor.check(&TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_lowered_expr()?)
                };
                self.cursor.expect(&TokenKind::Semicolon)?;
                StmtKind::Return(value)
            }
            TokenKind::Semicolon => {
                self.cursor.advance();
                StmtKind::Nop
            }
            _ if self.at_class_definition() => return self.parse_class_definition(),
            _ if self.at_function_definition() => return self.parse_function_definition(),
            _ => {
                let kind = self.parse_simple_stmt()?;
                self.cursor.expect(&TokenKind::Semicolon)?;
                kind
            }
        };
        Ok(Stmt::new(kind, pos))
    }

    /// Declaration or expression statement, without the `;`.
    fn parse_simple_stmt(&mut self) -> Result<StmtKind, ParseError> {
        if self.at_declaration() {
            return Ok(StmtKind::Decl(self.parse_declaration()?));
        }
        let pos = self.cursor.current_pos();
        let node = self.parse_expr()?;
        Ok(expr_statement(node, pos))
    }

    fn parse_compound(&mut self) -> Result<StmtKind, ParseError> {
        self.cursor.expect(&TokenKind::LBrace)?;
        let mut body = Vec::new();
        while !self.cursor.eat(&TokenKind::RBrace) {
            if self.cursor.is_at_end() {
                return Err(ParseError::expected_kind(
                    &TokenKind::RBrace,
                    self.cursor.current(),
                ));
            }
            body.push(self.parse_stmt()?);
        }
        Ok(StmtKind::Compound(body))
    }

    fn parse_condition(&mut self) -> Result<Expr, ParseError> {
        self.cursor.expect(&TokenKind::LParen)?;
        let cond = self.parse_lowered_expr()?;
        self.cursor.expect(&TokenKind::RParen)?;
        Ok(cond)
    }

    fn parse_if(&mut self) -> Result<StmtKind, ParseError> {
        self.cursor.expect(&TokenKind::If)?;
        let cond = self.parse_condition()?;
        let then_branch = Box::new(self.parse_stmt()?);
        let else_branch = if self.cursor.eat(&TokenKind::Else) {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        Ok(StmtKind::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    fn parse_while(&mut self) -> Result<StmtKind, ParseError> {
        self.cursor.expect(&TokenKind::While)?;
        let cond = self.parse_condition()?;
        let body = Box::new(self.parse_stmt()?);
        Ok(StmtKind::While { cond, body })
    }

    /// `for (init; cond; step) body`, each clause optional.
    fn parse_for(&mut self) -> Result<StmtKind, ParseError> {
        self.cursor.expect(&TokenKind::For)?;
        self.cursor.expect(&TokenKind::LParen)?;

        let init = if self.cursor.check(&TokenKind::Semicolon) {
            None
        } else {
            let pos = self.cursor.current_pos();
            Some(Box::new(Stmt::new(self.parse_simple_stmt()?, pos)))
        };
        self.expect_for_separator()?;

        let cond = if self.cursor.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_lowered_expr()?)
        };
        self.expect_for_separator()?;

        let step = if self.cursor.check(&TokenKind::RParen) {
            None
        } else {
            let pos = self.cursor.current_pos();
            let node = self.parse_expr()?;
            Some(Box::new(Stmt::new(expr_statement(node, pos), pos)))
        };
        self.cursor.expect(&TokenKind::RParen)?;

        let body = Box::new(self.parse_stmt()?);
        Ok(StmtKind::For {
            init,
            cond,
            step,
            body,
        })
    }

    fn expect_for_separator(&mut self) -> Result<(), ParseError> {
        if self.cursor.check(&TokenKind::RParen) {
            return Err(ParseError::new(
                ParseErrorKind::MalformedFor,
                self.cursor.current_pos().line,
            ));
        }
        self.cursor.expect(&TokenKind::Semicolon)?;
        Ok(())
    }
}

/// Turn a parsed expression into a statement. Assignments whose target is
/// a member access or an index become set-member / set-index statements.
fn expr_statement(node: Node, pos: Pos) -> StmtKind {
    let Node::Assign { op, target, value } = node else {
        return StmtKind::Expr(lower(node, pos));
    };
    match *target {
        Node::Member { object, member } => StmtKind::SetMember {
            target: lower(*object, pos),
            member,
            op,
            value: lower(*value, pos),
        },
        Node::Index { object, index } => StmtKind::SetIndex {
            target: lower(*object, pos),
            index: lower(*index, pos),
            op,
            value: lower(*value, pos),
        },
        target => StmtKind::Expr(lower(
            Node::Assign {
                op,
                target: Box::new(target),
                value,
            },
            pos,
        )),
    }
}
