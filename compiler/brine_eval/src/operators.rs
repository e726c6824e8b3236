//! Binary and unary operator implementations.
//!
//! Operands arrive fully resolved: no placeholders, no references. The
//! only implicit conversions are string concatenation with `+` and the
//! array forms of `+`, `-` and `^`; everything else requires matching
//! operand kinds.

use crate::errors::{
    division_by_zero, index_out_of_bounds, invalid_operand, invalid_operands, modulo_by_zero,
    EvalResult,
};
use crate::types::{inline_type, is_compatible};
use crate::value::{format_num, ArrayValue, Value};
use brine_ir::{BinaryOp, UnaryOp};

/// Evaluate a binary operation.
#[allow(clippy::needless_pass_by_value)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => sub(left, right),
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => arithmetic(&left, &right, op),
        BinaryOp::Eq => equals(&left, &right, op).map(Value::Bool),
        BinaryOp::NotEq => equals(&left, &right, op).map(|eq| Value::Bool(!eq)),
        BinaryOp::Gt => greater(&left, &right, op).map(Value::Bool),
        BinaryOp::Lt => greater(&right, &left, op).map(Value::Bool),
        // `a >= b` is `(a > b) || (a == b)`; both sides are evaluated
        BinaryOp::GtEq => {
            let gt = evaluate_binary(left.clone(), right.clone(), BinaryOp::Gt)?;
            let eq = evaluate_binary(left, right, BinaryOp::Eq)?;
            evaluate_binary(gt, eq, BinaryOp::Or)
        }
        BinaryOp::LtEq => {
            let lt = evaluate_binary(right.clone(), left.clone(), BinaryOp::Gt)?;
            let eq = evaluate_binary(left, right, BinaryOp::Eq)?;
            evaluate_binary(lt, eq, BinaryOp::Or)
        }
        BinaryOp::And | BinaryOp::Or => match (&left, &right) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(if op == BinaryOp::And {
                *a && *b
            } else {
                *a || *b
            })),
            _ => Err(invalid_operands(op.as_symbol(), &left, &right)),
        },
        BinaryOp::BitXor => match (left, right) {
            (Value::Array(a), Value::Array(b)) if a.element_type == b.element_type => {
                let mut elements = a.elements;
                elements.extend(b.elements);
                Ok(Value::array(a.element_type, elements))
            }
            (left, right) => bitwise(&left, &right, op),
        },
        BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::Shl | BinaryOp::Shr => {
            bitwise(&left, &right, op)
        }
    }
}

/// Evaluate a prefix operation.
pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Neg, Value::Num(n)) => Ok(Value::Num(-n)),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::BitNot, value) => match value.as_int() {
            Some(n) => Ok(Value::Num(!n as f64)),
            None => Err(invalid_operand(op.as_symbol(), value)),
        },
        _ => Err(invalid_operand(op.as_symbol(), operand)),
    }
}

/// Display form of a scalar for concatenation.
fn concat_form(value: &Value) -> Option<String> {
    match value {
        Value::Num(n) => Some(format_num(*n)),
        Value::Str(s) => Some(s.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn element_fits(array: &ArrayValue, value: &Value) -> bool {
    !matches!(value, Value::Array(_)) && is_compatible(&array.element_type, &inline_type(value))
}

fn add(left: Value, right: Value) -> EvalResult {
    match (left, right) {
        (Value::Num(a), Value::Num(b)) => Ok(Value::Num(a + b)),
        (Value::Array(mut array), value) if element_fits(&array, &value) => {
            array.elements.push(value);
            Ok(Value::Array(array))
        }
        (value, Value::Array(mut array)) if element_fits(&array, &value) => {
            array.elements.insert(0, value);
            Ok(Value::Array(array))
        }
        (left @ Value::Str(_), right) | (left, right @ Value::Str(_)) => {
            match (concat_form(&left), concat_form(&right)) {
                (Some(a), Some(b)) => Ok(Value::str(&(a + &b))),
                _ => Err(invalid_operands("+", &left, &right)),
            }
        }
        (left, right) => Err(invalid_operands("+", &left, &right)),
    }
}

fn sub(left: Value, right: Value) -> EvalResult {
    match (left, right) {
        (Value::Num(a), Value::Num(b)) => Ok(Value::Num(a - b)),
        (Value::Array(mut array), index) if index.is_integer() => {
            let len = array.elements.len();
            match index.as_int() {
                Some(i) if (0..len as i64).contains(&i) => {
                    array.elements.remove(i as usize);
                    Ok(Value::Array(array))
                }
                _ => Err(index_out_of_bounds(&index, len)),
            }
        }
        (left, right) => Err(invalid_operands("-", &left, &right)),
    }
}

fn arithmetic(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let (Value::Num(a), Value::Num(b)) = (left, right) else {
        return Err(invalid_operands(op.as_symbol(), left, right));
    };
    match op {
        BinaryOp::Mul => Ok(Value::Num(a * b)),
        BinaryOp::Div if *b == 0.0 => Err(division_by_zero()),
        BinaryOp::Div => Ok(Value::Num(a / b)),
        BinaryOp::Mod if *b == 0.0 => Err(modulo_by_zero()),
        _ => Ok(Value::Num(a % b)),
    }
}

fn equals(left: &Value, right: &Value, op: BinaryOp) -> Result<bool, crate::errors::EvalError> {
    match (left, right) {
        (Value::Num(a), Value::Num(b)) => Ok(a == b),
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        _ => Err(invalid_operands(op.as_symbol(), left, right)),
    }
}

/// `a > b`. Also serves `<` with the operands swapped, so errors name `op`.
fn greater(a: &Value, b: &Value, op: BinaryOp) -> Result<bool, crate::errors::EvalError> {
    match (a, b) {
        (Value::Num(x), Value::Num(y)) => Ok(x > y),
        _ => Err(invalid_operands(op.as_symbol(), a, b)),
    }
}

fn bitwise(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let (Some(a), Some(b)) = (left.as_int(), right.as_int()) else {
        return Err(invalid_operands(op.as_symbol(), left, right));
    };
    let result = match op {
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::Shl | BinaryOp::Shr => {
            let shift = u32::try_from(b)
                .ok()
                .filter(|s| *s < 64)
                .ok_or_else(|| invalid_operands(op.as_symbol(), left, right))?;
            if op == BinaryOp::Shl {
                a << shift
            } else {
                a >> shift
            }
        }
        _ => return Err(invalid_operands(op.as_symbol(), left, right)),
    };
    Ok(Value::Num(result as f64))
}
