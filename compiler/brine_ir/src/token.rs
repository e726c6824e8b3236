//! Lexer output consumed by the parser.

use crate::{Name, Pos};
use std::fmt;

/// Kind of a lexed token. Literal payloads are already cooked (escapes
/// resolved, numbers parsed).
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Literals
    Num(f64),
    Str(String),
    Ident(Name),

    // Keywords
    Const,
    Alloc,
    Ref,
    Func,
    Closure,
    Class,
    If,
    Else,
    While,
    For,
    Break,
    Continue,
    Return,
    True,
    False,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Dot,
    Arrow,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    AmpAmp,
    PipePipe,
    Amp,
    Pipe,
    Caret,
    Shl,
    Shr,
    Bang,
    Tilde,

    // Assignment family
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    PipeEq,
    CaretEq,

    Eof,
}

impl TokenKind {
    /// Short human-readable description used in syntax errors.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Num(n) => format!("number `{n}`"),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::Eof => "end of file".to_string(),
            other => format!("`{}`", other.symbol()),
        }
    }

    /// Source spelling of keyword and punctuation tokens.
    pub fn symbol(&self) -> &'static str {
        match self {
            TokenKind::Num(_) => "<number>",
            TokenKind::Str(_) => "<string>",
            TokenKind::Ident(_) => "<identifier>",
            TokenKind::Const => "const",
            TokenKind::Alloc => "alloc",
            TokenKind::Ref => "ref",
            TokenKind::Func => "func",
            TokenKind::Closure => "closure",
            TokenKind::Class => "class",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Return => "return",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Dot => ".",
            TokenKind::Arrow => "->",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::AmpAmp => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::Amp => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Shl => "<<",
            TokenKind::Shr => ">>",
            TokenKind::Bang => "!",
            TokenKind::Tilde => "~",
            TokenKind::Eq => "=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::AmpEq => "&=",
            TokenKind::PipeEq => "|=",
            TokenKind::CaretEq => "^=",
            TokenKind::Eof => "<eof>",
        }
    }
}

/// A token with its source text and position.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, pos: Pos) -> Self {
        Token {
            kind,
            text: text.into(),
            pos,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind.describe(), self.pos)
    }
}
