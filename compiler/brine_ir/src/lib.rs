//! Brine IR - shared data types for the Brine interpreter.
//!
//! This crate holds everything the lexer, parser and evaluator agree on:
//! - `Name`: cheaply clonable identifier text
//! - `Token` / `TokenKind`: lexer output
//! - `Program`, `Stmt`, `Expr`: the parsed tree handed to the evaluator
//! - `BinaryOp`, `UnaryOp`, `AssignOp`: operator tables with precedence
//!
//! Expressions are stored in postfix order. The parser's precedence pass
//! has already decided evaluation order; the evaluator only linearizes
//! parenthesized groups before running them.

pub mod ast;
mod name;
mod pos;
mod token;

pub use ast::{
    AssignOp, BinaryOp, ClassDef, DeclFlags, Declaration, Expr, ExprItem, FunctionDef, Param,
    Program, Stmt, StmtKind, TypeName, UnaryOp,
};
pub use name::Name;
pub use pos::Pos;
pub use token::{Token, TokenKind};
