//! The RPN stack machine.
//!
//! Value tokens push. Operator tokens pop their operands, resolve them and
//! push one result. Bare identifiers stay placeholders on the stack until
//! an operator needs their data, which lets `=` and calls see the name.

use super::place::Place;
use super::Interpreter;
use crate::errors::{
    index_out_of_bounds, invalid_operand, no_such_member, not_assignable, type_mismatch,
    EvalError, EvalResult,
};
use crate::flatten::{flatten, Rpn};
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::types::{self, inline_type, is_compatible};
use crate::value::{FunctionValue, Value};
use brine_ir::{Expr, TypeName};
use smallvec::SmallVec;
use std::rc::Rc;

type Operands = SmallVec<[Value; 8]>;

impl Interpreter {
    /// Evaluate `expr` to an owned copy of its data.
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        let value = self.run_rpn(expr)?;
        self.resolve_owned(value)
    }

    /// Evaluate `expr` for a slot that may hold a reference. With `by_ref`
    /// a result that lives on the heap comes back as its `Ref` rather than
    /// a copy of the data.
    pub(crate) fn eval_hint(&mut self, expr: &Expr, by_ref: bool) -> EvalResult {
        if !by_ref {
            return self.eval_expr(expr);
        }
        match self.run_rpn(expr)? {
            Value::Ident(name) => Ok(self.lookup_value(&name)?.copy()),
            other => Ok(other),
        }
    }

    /// Execute `expr` and return the value left on top of the stack,
    /// unresolved. An empty expression yields `Void`.
    pub(crate) fn run_rpn(&mut self, expr: &Expr) -> EvalResult {
        let mut stack = Operands::new();
        for token in flatten(expr) {
            let value = match token {
                Rpn::Num(n) => Value::Num(n),
                Rpn::Str(s) => Value::Str(Rc::clone(s)),
                Rpn::Bool(b) => Value::Bool(b),
                Rpn::Ident(name) => Value::Ident(name.clone()),
                Rpn::Function(def) => Value::Function(FunctionValue::new(Rc::clone(def))),
                Rpn::Array(elements) => self.build_array(elements)?,
                Rpn::Binary(op) => {
                    let right = pop(&mut stack)?;
                    let left = pop(&mut stack)?;
                    let left = self.resolve_owned(left)?;
                    let right = self.resolve_owned(right)?;
                    evaluate_binary(left, right, op)?
                }
                Rpn::Unary(op) => {
                    let operand = pop(&mut stack)?;
                    evaluate_unary(self.resolve(&operand)?, op)?
                }
                Rpn::Assign(op) => {
                    let value = pop(&mut stack)?;
                    let name = match pop(&mut stack)? {
                        Value::Ident(name) => name,
                        other => return Err(not_assignable(&other)),
                    };
                    let value = self.resolve_owned(value)?;
                    self.assign(Place::variable(name), op, value)?
                }
                Rpn::Member => {
                    let member = pop(&mut stack)?;
                    let object = pop(&mut stack)?;
                    self.member(&object, &member)?
                }
                Rpn::Call(args) => {
                    let callee = pop(&mut stack)?;
                    self.call(callee, args)?
                }
                Rpn::Index(index) => {
                    let target = pop(&mut stack)?;
                    self.index(&target, index)?
                }
            };
            stack.push(value);
        }
        Ok(stack.pop().unwrap_or(Value::Void))
    }

    /// `[a, b, c]`: the first element fixes the element type.
    fn build_array(&mut self, elements: &[Expr]) -> EvalResult {
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            values.push(self.eval_expr(element)?);
        }
        let element_type = values.first().map_or_else(TypeName::var, inline_type);
        for value in values.iter().skip(1) {
            let actual = inline_type(value);
            if !is_compatible(&element_type, &actual) {
                return Err(type_mismatch(element_type.as_str(), actual.as_str()));
            }
        }
        Ok(Value::array(element_type, values))
    }

    /// `object.member`. Function members remember the member name, and
    /// bind to the object's heap chunk when the object was reached
    /// through a reference.
    fn member(&self, object: &Value, member: &Value) -> EvalResult {
        let Value::Ident(name) = member else {
            return Err(invalid_operand(".", member));
        };
        let (data, origin) = self.resolve_with_origin(object)?;
        let Value::Object(object) = data else {
            return Err(invalid_operand(".", data));
        };
        let value = object
            .get(name)
            .ok_or_else(|| no_such_member(&object.class_name, name))?;
        Ok(match value {
            Value::Function(func) => Value::Function(FunctionValue {
                def: Rc::clone(&func.def),
                this_ref: origin.or(func.this_ref),
                bound_name: Some(name.clone()),
            }),
            other => other.copy(),
        })
    }

    /// `target[index]`.
    fn index(&mut self, target: &Value, index: &Expr) -> EvalResult {
        let index = self.eval_expr(index)?;
        let array = match self.resolve(target)? {
            Value::Array(array) => array,
            other => return Err(invalid_operand("[]", other)),
        };
        let i = checked_index(&index, array.elements.len())?;
        Ok(array.elements[i].copy())
    }
}

/// Validate an array index: an integer in `[0, len)`.
pub(crate) fn checked_index(index: &Value, len: usize) -> Result<usize, EvalError> {
    let Some(i) = index.as_int() else {
        if index.is_integer() {
            return Err(index_out_of_bounds(index, len));
        }
        return Err(type_mismatch(types::INT, inline_type(index).as_str()));
    };
    usize::try_from(i)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| index_out_of_bounds(index, len))
}

fn pop(stack: &mut Operands) -> EvalResult {
    stack
        .pop()
        .ok_or_else(|| EvalError::new("malformed expression: operand stack underflow"))
}
