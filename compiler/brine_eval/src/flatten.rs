//! Expression flattening.
//!
//! The parser already emits operands before operators, so producing the
//! RPN stream only means splicing parenthesized groups in place. Call
//! arguments and index expressions are left attached to their operator
//! and evaluated when it runs.

use brine_ir::{AssignOp, BinaryOp, Expr, ExprItem, FunctionDef, Name, UnaryOp};
use smallvec::SmallVec;
use std::rc::Rc;

/// One element of the flattened stream, borrowing from the syntax tree.
#[derive(Clone, Debug)]
pub enum Rpn<'e> {
    // Value tokens
    Num(f64),
    Str(&'e Rc<str>),
    Bool(bool),
    Ident(&'e Name),
    Function(&'e Rc<FunctionDef>),
    Array(&'e [Expr]),

    // Operator tokens
    Binary(BinaryOp),
    Unary(UnaryOp),
    Assign(AssignOp),
    Member,
    Call(&'e [Expr]),
    Index(&'e Expr),
}

pub type RpnStream<'e> = SmallVec<[Rpn<'e>; 16]>;

/// Linearize `expr` into a single RPN stream.
pub fn flatten(expr: &Expr) -> RpnStream<'_> {
    let mut out = RpnStream::new();
    flatten_into(expr, &mut out);
    out
}

fn flatten_into<'e>(expr: &'e Expr, out: &mut RpnStream<'e>) {
    for item in &expr.items {
        let token = match item {
            ExprItem::Grouped(inner) => {
                flatten_into(inner, out);
                continue;
            }
            ExprItem::Num(n) => Rpn::Num(*n),
            ExprItem::Str(s) => Rpn::Str(s),
            ExprItem::Bool(b) => Rpn::Bool(*b),
            ExprItem::Ident(name) => Rpn::Ident(name),
            ExprItem::Function(def) => Rpn::Function(def),
            ExprItem::Array(elements) => Rpn::Array(elements),
            ExprItem::Binary(op) => Rpn::Binary(*op),
            ExprItem::Unary(op) => Rpn::Unary(*op),
            ExprItem::Assign(op) => Rpn::Assign(*op),
            ExprItem::Member => Rpn::Member,
            ExprItem::Call(args) => Rpn::Call(args),
            ExprItem::Index(index) => Rpn::Index(index),
        };
        out.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brine_ir::Pos;
    use pretty_assertions::assert_eq;

    fn expr(items: Vec<ExprItem>) -> Expr {
        Expr::new(items, Pos::new(1))
    }

    fn shape(stream: &RpnStream<'_>) -> Vec<String> {
        stream
            .iter()
            .map(|token| match token {
                Rpn::Num(n) => n.to_string(),
                Rpn::Ident(name) => name.to_string(),
                Rpn::Binary(op) => op.to_string(),
                Rpn::Call(args) => format!("call/{}", args.len()),
                Rpn::Index(_) => "index".to_string(),
                other => format!("{other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_groups_are_spliced() {
        // (1 + (2 * x)) - 3
        let inner = expr(vec![
            ExprItem::Num(2.0),
            ExprItem::Ident(Name::new("x")),
            ExprItem::Binary(BinaryOp::Mul),
        ]);
        let outer = expr(vec![
            ExprItem::Num(1.0),
            ExprItem::Grouped(inner),
            ExprItem::Binary(BinaryOp::Add),
        ]);
        let full = expr(vec![
            ExprItem::Grouped(outer),
            ExprItem::Num(3.0),
            ExprItem::Binary(BinaryOp::Sub),
        ]);
        assert_eq!(
            shape(&flatten(&full)),
            vec!["1", "2", "x", "*", "+", "3", "-"]
        );
    }

    #[test]
    fn test_call_arguments_stay_unflattened() {
        let arg = expr(vec![ExprItem::Grouped(expr(vec![ExprItem::Num(1.0)]))]);
        let call = expr(vec![
            ExprItem::Ident(Name::new("f")),
            ExprItem::Call(vec![arg.clone(), arg]),
            ExprItem::Index(Box::new(expr(vec![ExprItem::Num(0.0)]))),
        ]);
        assert_eq!(shape(&flatten(&call)), vec!["f", "call/2", "index"]);
    }

    #[test]
    fn test_empty_expression() {
        assert!(flatten(&Expr::default()).is_empty());
    }
}
