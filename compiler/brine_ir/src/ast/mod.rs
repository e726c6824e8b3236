//! Syntax tree produced by the parser.
//!
//! Statements are an ordinary tree. Expressions are not: each `Expr` is a
//! postfix sequence of `ExprItem`s in evaluation order, with parenthesized
//! sub-expressions kept as `ExprItem::Grouped` and call arguments / index
//! expressions carried unevaluated by their operator item.

mod operators;

use crate::{Name, Pos};
use bitflags::bitflags;
use std::fmt;
use std::rc::Rc;

pub use operators::{AssignOp, BinaryOp, UnaryOp};

/// A parsed source file.
#[derive(Clone, Debug)]
pub struct Program {
    pub source_name: Name,
    pub statements: Vec<Stmt>,
}

/// A declared type such as `int`, `str[]` or `Point`.
///
/// Array types are spelled with a trailing `[]`; the element type is the
/// same text with that suffix removed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeName(Name);

impl TypeName {
    pub const VAR: &'static str = "var";
    pub const VOID: &'static str = "void";

    pub fn new(text: &str) -> Self {
        TypeName(Name::new(text))
    }

    pub fn var() -> Self {
        TypeName::new(Self::VAR)
    }

    pub fn void() -> Self {
        TypeName::new(Self::VOID)
    }

    pub fn array_of(element: &TypeName) -> Self {
        TypeName(Name::from(format!("{}[]", element.as_str())))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn name(&self) -> &Name {
        &self.0
    }

    pub fn is_array(&self) -> bool {
        self.0.ends_with("[]")
    }

    /// Element type of an array type, `None` for scalars.
    pub fn element_type(&self) -> Option<TypeName> {
        self.0.strip_suffix("[]").map(TypeName::new)
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A function parameter or class member slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: Name,
    pub ty: TypeName,
    pub is_ref: bool,
}

/// Function literal body and signature. Shared (never duplicated) between
/// every runtime value created from it.
#[derive(Debug)]
pub struct FunctionDef {
    pub params: Vec<Param>,
    pub return_type: TypeName,
    pub returns_ref: bool,
    pub captures: bool,
    pub body: Stmt,
    pub pos: Pos,
}

/// `class Name { members }` - a constructor template.
#[derive(Debug)]
pub struct ClassDef {
    pub name: Name,
    pub members: Rc<[Param]>,
}

bitflags! {
    /// Modifiers written before a declaration's type.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DeclFlags: u8 {
        const CONST = 1;
        const ALLOC = 1 << 1;
        const REF = 1 << 2;
    }
}

/// `[const] [alloc] [ref] TYPE NAME [= EXPR];`
#[derive(Clone, Debug)]
pub struct Declaration {
    pub ty: TypeName,
    pub name: Name,
    pub flags: DeclFlags,
    pub init: Option<Expr>,
}

impl Declaration {
    pub fn is_constant(&self) -> bool {
        self.flags.contains(DeclFlags::CONST)
    }

    pub fn is_allocated(&self) -> bool {
        self.flags.contains(DeclFlags::ALLOC)
    }

    pub fn is_reference(&self) -> bool {
        self.flags.contains(DeclFlags::REF)
    }
}

/// A statement with the position recorded for runtime errors.
#[derive(Clone, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub pos: Pos,
}

impl Stmt {
    pub fn new(kind: StmtKind, pos: Pos) -> Self {
        Stmt { kind, pos }
    }
}

#[derive(Clone, Debug)]
pub enum StmtKind {
    Expr(Expr),
    Decl(Declaration),
    Class(Rc<ClassDef>),
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    /// `for (init; cond; step) body` - the three slots are always present,
    /// each may be empty. `step` is a statement so that `xs[i] += 1` works
    /// there the same way it does on its own line.
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        step: Option<Box<Stmt>>,
        body: Box<Stmt>,
    },
    Compound(Vec<Stmt>),
    Break,
    Continue,
    Return(Option<Expr>),
    /// `target.member op value;`
    SetMember {
        target: Expr,
        member: Name,
        op: AssignOp,
        value: Expr,
    },
    /// `target[index] op value;`
    SetIndex {
        target: Expr,
        index: Expr,
        op: AssignOp,
        value: Expr,
    },
    Nop,
}

/// A postfix-ordered expression.
#[derive(Clone, Debug, Default)]
pub struct Expr {
    pub items: Vec<ExprItem>,
    pub pos: Pos,
}

impl Expr {
    pub fn new(items: Vec<ExprItem>, pos: Pos) -> Self {
        Expr { items, pos }
    }

    /// An empty argument slot, e.g. the single group in `f()`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One postfix item. Value items push, operator items consume.
#[derive(Clone, Debug)]
pub enum ExprItem {
    Num(f64),
    Str(Rc<str>),
    Bool(bool),
    Ident(Name),
    Function(Rc<FunctionDef>),
    /// `[a, b, c]`; elements are evaluated when the literal is pushed.
    Array(Vec<Expr>),

    Binary(BinaryOp),
    Unary(UnaryOp),
    Assign(AssignOp),
    /// `.` - consumes the object and an identifier placeholder.
    Member,
    /// `(args)` - argument groups in source order, unevaluated.
    Call(Vec<Expr>),
    /// `[index]` - index expression, unevaluated.
    Index(Box<Expr>),
    /// A parenthesized sub-expression, itself postfix-ordered.
    Grouped(Expr),
}

#[cfg(test)]
mod tests;
