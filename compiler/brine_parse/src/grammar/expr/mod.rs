//! Expression parsing.
//!
//! `parse_expr` climbs binary precedence over a temporary [`Node`] tree;
//! callers lower the finished tree with [`lower`] (or inspect its root
//! first, as assignment statements do).

mod lower;

pub(crate) use lower::lower;

use crate::{ParseError, ParseErrorKind, Parser};
use brine_ir::{AssignOp, BinaryOp, Expr, FunctionDef, Name, TokenKind, UnaryOp};
use brine_stack::ensure_sufficient_stack;
use std::rc::Rc;

/// Expression tree before lowering. Never leaves the parser.
#[derive(Debug)]
pub(crate) enum Node {
    Num(f64),
    Str(Rc<str>),
    Bool(bool),
    Ident(Name),
    Function(Rc<FunctionDef>),
    Array(Vec<Node>),
    Paren(Box<Node>),
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Node>,
    },
    Assign {
        op: AssignOp,
        target: Box<Node>,
        value: Box<Node>,
    },
    Member {
        object: Box<Node>,
        member: Name,
    },
    Call {
        callee: Box<Node>,
        args: Vec<Node>,
    },
    Index {
        object: Box<Node>,
        index: Box<Node>,
    },
}

impl Parser<'_> {
    /// Parse a full expression, assignment included.
    pub(crate) fn parse_expr(&mut self) -> Result<Node, ParseError> {
        ensure_sufficient_stack(|| self.parse_assign())
    }

    /// Assignment is right-associative and binds loosest.
    fn parse_assign(&mut self) -> Result<Node, ParseError> {
        let target = self.parse_binary(BinaryOp::Or.precedence())?;

        if let Some(op) = self.match_assign_op() {
            self.cursor.advance();
            let value = self.parse_expr()?;
            return Ok(Node::Assign {
                op,
                target: Box::new(target),
                value: Box::new(value),
            });
        }

        Ok(target)
    }

    /// Precedence climbing over left-associative binary operators.
    fn parse_binary(&mut self, min_prec: u8) -> Result<Node, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some(op) = self.match_binary_op() {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.cursor.advance();
            let right = ensure_sufficient_stack(|| self.parse_binary(prec + 1))?;
            left = Node::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Prefix operators, right-associative.
    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        if let Some(op) = self.match_unary_op() {
            self.cursor.advance();
            let operand = ensure_sufficient_stack(|| self.parse_unary())?;
            return Ok(Node::Unary {
                op,
                operand: Box::new(operand),
            });
        }

        self.parse_postfix()
    }

    /// Member access, calls and indexing, all left-to-right.
    fn parse_postfix(&mut self) -> Result<Node, ParseError> {
        let mut node = self.parse_primary()?;

        loop {
            match self.cursor.current_kind() {
                TokenKind::Dot => {
                    self.cursor.advance();
                    let member = self.cursor.expect_ident()?;
                    node = Node::Member {
                        object: Box::new(node),
                        member,
                    };
                }
                TokenKind::LParen => {
                    self.cursor.advance();
                    let args = self.parse_expr_list(&TokenKind::RParen)?;
                    node = Node::Call {
                        callee: Box::new(node),
                        args,
                    };
                }
                TokenKind::LBracket => {
                    self.cursor.advance();
                    let index = self.parse_expr()?;
                    self.cursor.expect(&TokenKind::RBracket)?;
                    node = Node::Index {
                        object: Box::new(node),
                        index: Box::new(index),
                    };
                }
                _ => return Ok(node),
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let token = self.cursor.current();
        let node = match &token.kind {
            TokenKind::Num(n) => Node::Num(*n),
            TokenKind::Str(s) => Node::Str(Rc::from(s.as_str())),
            TokenKind::True => Node::Bool(true),
            TokenKind::False => Node::Bool(false),
            TokenKind::Ident(name) => Node::Ident(name.clone()),
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                self.cursor.expect(&TokenKind::RParen)?;
                return Ok(Node::Paren(Box::new(inner)));
            }
            TokenKind::LBracket => {
                self.cursor.advance();
                let elements = self.parse_expr_list(&TokenKind::RBracket)?;
                return Ok(Node::Array(elements));
            }
            TokenKind::Func | TokenKind::Closure => {
                let def = self.parse_function_literal()?;
                return Ok(Node::Function(Rc::new(def)));
            }
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedExpression(token.kind.describe()),
                    token.pos.line,
                ))
            }
        };
        self.cursor.advance();
        Ok(node)
    }

    /// Comma-separated expressions up to and including `close`.
    fn parse_expr_list(&mut self, close: &TokenKind) -> Result<Vec<Node>, ParseError> {
        let mut items = Vec::new();
        if self.cursor.eat(close) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_expr()?);
            if self.cursor.eat(close) {
                return Ok(items);
            }
            self.cursor.expect(&TokenKind::Comma)?;
        }
    }

    /// Parse an expression and lower it immediately.
    pub(crate) fn parse_lowered_expr(&mut self) -> Result<Expr, ParseError> {
        let pos = self.cursor.current_pos();
        let node = self.parse_expr()?;
        Ok(lower(node, pos))
    }

    fn match_binary_op(&self) -> Option<BinaryOp> {
        let op = match self.cursor.current_kind() {
            TokenKind::PipePipe => BinaryOp::Or,
            TokenKind::AmpAmp => BinaryOp::And,
            TokenKind::Pipe => BinaryOp::BitOr,
            TokenKind::Caret => BinaryOp::BitXor,
            TokenKind::Amp => BinaryOp::BitAnd,
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::GtEq => BinaryOp::GtEq,
            TokenKind::Shl => BinaryOp::Shl,
            TokenKind::Shr => BinaryOp::Shr,
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Mod,
            _ => return None,
        };
        Some(op)
    }

    fn match_unary_op(&self) -> Option<UnaryOp> {
        match self.cursor.current_kind() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            _ => None,
        }
    }

    fn match_assign_op(&self) -> Option<AssignOp> {
        match self.cursor.current_kind() {
            TokenKind::Eq => Some(AssignOp::Assign),
            TokenKind::PlusEq => Some(AssignOp::Add),
            TokenKind::MinusEq => Some(AssignOp::Sub),
            TokenKind::StarEq => Some(AssignOp::Mul),
            TokenKind::SlashEq => Some(AssignOp::Div),
            TokenKind::PercentEq => Some(AssignOp::Mod),
            TokenKind::AmpEq => Some(AssignOp::BitAnd),
            TokenKind::PipeEq => Some(AssignOp::BitOr),
            TokenKind::CaretEq => Some(AssignOp::BitXor),
            _ => None,
        }
    }
}

