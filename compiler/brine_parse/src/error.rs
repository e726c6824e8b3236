//! Parse error types.

use brine_ir::{Token, TokenKind};
use brine_lexer::LexError;
use thiserror::Error;

/// What went wrong while parsing.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("expected an expression, found {0}")]
    ExpectedExpression(String),
    #[error("expected a type, found {0}")]
    ExpectedType(String),
    #[error("`for` takes exactly three clauses separated by `;`")]
    MalformedFor,
}

/// A syntax error with the line of the offending token.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{kind} (line {line})")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: u32,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: u32) -> Self {
        ParseError { kind, line }
    }

    /// `expected` wanted, `found` seen instead.
    pub(crate) fn unexpected(expected: impl Into<String>, found: &Token) -> Self {
        ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected: expected.into(),
                found: found.kind.describe(),
            },
            found.pos.line,
        )
    }

    pub(crate) fn expected_kind(expected: &TokenKind, found: &Token) -> Self {
        Self::unexpected(format!("`{}`", expected.symbol()), found)
    }
}

/// Any error raised before evaluation starts.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn line(&self) -> u32 {
        match self {
            SyntaxError::Lex(err) => err.line,
            SyntaxError::Parse(err) => err.line,
        }
    }
}
