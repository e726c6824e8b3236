//! Lexer for Brine using logos.
//!
//! Produces a flat `Vec<Token>` terminated by `Eof`. Newlines and `//`
//! comments are trivia: they only advance the line counter. Number
//! literals are parsed to `f64` and string literals have their escapes
//! cooked here, so the parser never looks at raw text.

mod escape;
mod lex_error;
mod raw_token;

use brine_ir::{Name, Pos, Token, TokenKind};
use logos::Logos;

use escape::unescape_string;
pub use lex_error::{LexError, LexErrorKind};
use raw_token::RawToken;

/// Lex source code into tokens.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut logos = RawToken::lexer(source);
    let mut line: u32 = 1;

    while let Some(token_result) = logos.next() {
        let slice = logos.slice();

        match token_result {
            Ok(RawToken::LineComment) => {}
            Ok(RawToken::Newline) => line += 1,
            Ok(raw) => {
                let kind = convert_token(raw, slice).map_err(|kind| LexError::new(kind, line))?;
                tokens.push(Token::new(kind, slice, Pos::new(line)));
            }
            Err(()) => return Err(LexError::new(classify_error(slice), line)),
        }
    }

    tokens.push(Token::new(TokenKind::Eof, "", Pos::new(line)));
    Ok(tokens)
}

/// Work out why logos rejected `slice`.
fn classify_error(slice: &str) -> LexErrorKind {
    match slice.chars().next() {
        Some('"') => LexErrorKind::UnterminatedString,
        Some(c) if c.is_ascii_digit() => LexErrorKind::MalformedNumber(slice.to_string()),
        Some(c) => LexErrorKind::UnexpectedChar(c),
        None => LexErrorKind::UnexpectedChar('\0'),
    }
}

/// Convert a raw token to a `TokenKind`, cooking literals.
fn convert_token(raw: RawToken, slice: &str) -> Result<TokenKind, LexErrorKind> {
    let kind = match raw {
        RawToken::Num(n) => TokenKind::Num(n),
        RawToken::Str => {
            let content = &slice[1..slice.len() - 1];
            TokenKind::Str(unescape_string(content).map_err(LexErrorKind::InvalidEscape)?)
        }
        RawToken::Ident => TokenKind::Ident(Name::new(slice)),

        // Keywords
        RawToken::Const => TokenKind::Const,
        RawToken::Alloc => TokenKind::Alloc,
        RawToken::Ref => TokenKind::Ref,
        RawToken::Func => TokenKind::Func,
        RawToken::Closure => TokenKind::Closure,
        RawToken::Class => TokenKind::Class,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::For => TokenKind::For,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Return => TokenKind::Return,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,

        // Delimiters
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Arrow => TokenKind::Arrow,

        // Operators
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Shl => TokenKind::Shl,
        RawToken::Shr => TokenKind::Shr,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Tilde => TokenKind::Tilde,

        RawToken::Eq => TokenKind::Eq,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::PercentEq => TokenKind::PercentEq,
        RawToken::AmpEq => TokenKind::AmpEq,
        RawToken::PipeEq => TokenKind::PipeEq,
        RawToken::CaretEq => TokenKind::CaretEq,

        // Trivia is filtered out by `lex`
        RawToken::LineComment | RawToken::Newline => TokenKind::Eof,
    };
    Ok(kind)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap to fail loudly on unexpected state")]
mod tests;
