//! Grammar productions, split by construct.
//!
//! - `stmt.rs`: statements and control flow
//! - `decl.rs`: declarations, types, parameters, function and class definitions
//! - `expr/`: expression precedence climbing and lowering to postfix

mod decl;
pub(crate) mod expr;
mod stmt;
