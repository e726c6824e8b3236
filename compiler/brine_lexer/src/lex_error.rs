//! Lexer error types.

use thiserror::Error;

/// What went wrong while scanning.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LexErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("invalid escape sequence `\\{0}` in string literal")]
    InvalidEscape(char),
    #[error("malformed number `{0}`")]
    MalformedNumber(String),
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
}

/// A lexer error with the 1-based line it occurred on.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind} (line {line})")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: u32,
}

impl LexError {
    pub fn new(kind: LexErrorKind, line: u32) -> Self {
        LexError { kind, line }
    }
}
