//! Recursive descent parser for Brine.
//!
//! Statements are parsed top-down. Expressions are parsed by precedence
//! climbing into a short-lived tree, which is then lowered to the postfix
//! `Expr` form the evaluator consumes (see `grammar::expr::lower`).

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind, SyntaxError};

use brine_ir::{Name, Program, Token};

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    /// Create a parser over `tokens`, which must end with `Eof`.
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    /// Parse statements until `Eof`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_program(&mut self, source_name: &str) -> Result<Program, ParseError> {
        let mut statements = Vec::new();
        while !self.cursor.is_at_end() {
            statements.push(self.parse_stmt()?);
        }
        tracing::debug!(count = statements.len(), "parsed top-level statements");
        Ok(Program {
            source_name: Name::new(source_name),
            statements,
        })
    }
}

/// Parse a lexed token stream into a program.
pub fn parse(tokens: &[Token], source_name: &str) -> Result<Program, ParseError> {
    if tokens.is_empty() {
        return Ok(Program {
            source_name: Name::new(source_name),
            statements: Vec::new(),
        });
    }
    Parser::new(tokens).parse_program(source_name)
}

/// Lex and parse source text in one step.
pub fn parse_source(source: &str, source_name: &str) -> Result<Program, SyntaxError> {
    let tokens = brine_lexer::lex(source)?;
    Ok(parse(&tokens, source_name)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap to fail loudly on unexpected state")]
mod tests;
