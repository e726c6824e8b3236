//! Lowering from the precedence tree to postfix items.
//!
//! Operands are emitted before their operator. Parentheses become a
//! `Grouped` item holding their own postfix sequence; call arguments and
//! index expressions stay attached to their operator item, unevaluated.

use super::Node;
use brine_ir::{Expr, ExprItem, Pos};
use brine_stack::ensure_sufficient_stack;

/// Lower a tree rooted at `node` into a postfix expression.
pub(crate) fn lower(node: Node, pos: Pos) -> Expr {
    let mut items = Vec::new();
    emit(node, pos, &mut items);
    Expr::new(items, pos)
}

fn emit(node: Node, pos: Pos, out: &mut Vec<ExprItem>) {
    ensure_sufficient_stack(|| match node {
        Node::Num(n) => out.push(ExprItem::Num(n)),
        Node::Str(s) => out.push(ExprItem::Str(s)),
        Node::Bool(b) => out.push(ExprItem::Bool(b)),
        Node::Ident(name) => out.push(ExprItem::Ident(name)),
        Node::Function(def) => out.push(ExprItem::Function(def)),
        Node::Array(elements) => {
            let elements = elements.into_iter().map(|e| lower(e, pos)).collect();
            out.push(ExprItem::Array(elements));
        }
        Node::Paren(inner) => out.push(ExprItem::Grouped(lower(*inner, pos))),
        Node::Binary { op, left, right } => {
            emit(*left, pos, out);
            emit(*right, pos, out);
            out.push(ExprItem::Binary(op));
        }
        Node::Unary { op, operand } => {
            emit(*operand, pos, out);
            out.push(ExprItem::Unary(op));
        }
        Node::Assign { op, target, value } => {
            emit(*target, pos, out);
            emit(*value, pos, out);
            out.push(ExprItem::Assign(op));
        }
        Node::Member { object, member } => {
            emit(*object, pos, out);
            out.push(ExprItem::Ident(member));
            out.push(ExprItem::Member);
        }
        Node::Call { callee, args } => {
            emit(*callee, pos, out);
            let args = args.into_iter().map(|a| lower(a, pos)).collect();
            out.push(ExprItem::Call(args));
        }
        Node::Index { object, index } => {
            emit(*object, pos, out);
            out.push(ExprItem::Index(Box::new(lower(*index, pos))));
        }
    });
}
