//! Assignment targets.
//!
//! A [`Place`] names a storage slot as a root (a variable or a heap chunk)
//! plus a path of member and index steps. Writing first normalizes the
//! place: every reference crossed on the way re-roots it at the chunk the
//! reference points to, so the final write touches exactly one variable or
//! chunk. A slot declared `ref` stores the reference itself; any other slot
//! that currently holds a reference is written through.

use super::rpn::checked_index;
use super::Interpreter;
use crate::errors::{
    assign_to_constant, invalid_operand, no_such_member, not_assignable, undefined_variable,
    EvalError, EvalResult,
};
use crate::flatten::{flatten, Rpn};
use crate::heap::HeapIndex;
use crate::operators::evaluate_binary;
use crate::types::conform;
use crate::value::Value;
use brine_ir::{AssignOp, Expr, Name, TypeName};
use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Root {
    Var(Name),
    Chunk(HeapIndex),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Step {
    Member(Name),
    /// Index value, validated when the place is walked.
    Index(Value),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Place {
    root: Root,
    path: SmallVec<[Step; 4]>,
}

impl Place {
    pub(crate) fn variable(name: Name) -> Self {
        Place {
            root: Root::Var(name),
            path: SmallVec::new(),
        }
    }

    fn chunk(index: HeapIndex) -> Self {
        Place {
            root: Root::Chunk(index),
            path: SmallVec::new(),
        }
    }

    pub(crate) fn push(&mut self, step: Step) {
        self.path.push(step);
    }
}

/// A normalized place and what the slot at its end accepts.
struct Slot {
    place: Place,
    declared: TypeName,
    holds_reference: bool,
}

impl Interpreter {
    /// Place named by the target of a set-member or set-index statement.
    ///
    /// `a`, `a.b` and `a[i].b` style paths are taken apart syntactically.
    /// Any other target must evaluate to a heap reference.
    pub(crate) fn place_of(&mut self, target: &Expr) -> Result<Place, EvalError> {
        let stream = flatten(target);
        if let Some((Rpn::Ident(root), rest)) = stream.split_first() {
            if is_path(rest) {
                let mut place = Place::variable((*root).clone());
                let mut tokens = rest.iter();
                while let Some(token) = tokens.next() {
                    match token {
                        Rpn::Ident(member) => {
                            tokens.next();
                            place.push(Step::Member((*member).clone()));
                        }
                        Rpn::Index(index) => {
                            let index = self.eval_expr(index)?;
                            place.push(Step::Index(index));
                        }
                        _ => {}
                    }
                }
                return Ok(place);
            }
        }
        match self.eval_hint(target, true)? {
            Value::Ref(index) => Ok(Place::chunk(index)),
            other => Err(not_assignable(&other)),
        }
    }

    /// Store `value` into `place`, combining it with the current contents
    /// first for compound operators. Returns the stored value.
    pub(crate) fn assign(&mut self, place: Place, op: AssignOp, value: Value) -> EvalResult {
        let slot = self.locate(&place)?;
        let value = match op.binary() {
            Some(binary) => {
                let current = self.slot_value(&slot.place)?.copy();
                let current = self.resolve_owned(current)?;
                let value = self.resolve_owned(value)?;
                evaluate_binary(current, value, binary)?
            }
            None => value,
        };
        let value = if slot.holds_reference {
            self.expect_reference(&slot.declared, value, || "a `ref` member".to_string())?
        } else {
            conform(value, &slot.declared, &self.heap)?
        };
        *self.slot_value_mut(&slot.place)? = value.copy();
        Ok(value)
    }

    /// Evaluate `expr` and assign it, passing references through when the
    /// slot is declared `ref`.
    pub(crate) fn assign_from(
        &mut self,
        place: Place,
        op: AssignOp,
        expr: &Expr,
    ) -> Result<(), EvalError> {
        let by_ref = op == AssignOp::Assign && self.locate(&place)?.holds_reference;
        let value = self.eval_hint(expr, by_ref)?;
        self.assign(place, op, value)?;
        Ok(())
    }

    /// Walk `place`, re-rooting at every reference crossed.
    fn locate(&self, place: &Place) -> Result<Slot, EvalError> {
        let (mut value, mut declared) = match &place.root {
            Root::Var(name) => {
                let var = self.writable_variable(name)?;
                (&var.value, var.declared_type.clone())
            }
            Root::Chunk(index) => (self.heap.deref(*index)?, TypeName::var()),
        };
        let mut normalized = Place {
            root: place.root.clone(),
            path: SmallVec::new(),
        };
        let mut holds_reference = false;

        for step in &place.path {
            if let Value::Ref(index) = value {
                let terminal = self.heap.terminal(*index)?;
                value = self.heap.deref(terminal)?;
                normalized = Place::chunk(terminal);
            }
            match step {
                Step::Member(member) => {
                    let Value::Object(object) = value else {
                        return Err(invalid_operand(".", value));
                    };
                    let position = object
                        .position(member)
                        .ok_or_else(|| no_such_member(&object.class_name, member))?;
                    let param = &object.layout[position];
                    declared = param.ty.clone();
                    holds_reference = param.is_ref;
                    value = &object.members[position];
                }
                Step::Index(index) => {
                    let Value::Array(array) = value else {
                        return Err(invalid_operand("[]", value));
                    };
                    let position = checked_index(index, array.elements.len())?;
                    declared = array.element_type.clone();
                    holds_reference = false;
                    value = &array.elements[position];
                }
            }
            normalized.push(step.clone());
        }

        if let (false, Value::Ref(index)) = (holds_reference, value) {
            normalized = Place::chunk(self.heap.terminal(*index)?);
        }
        Ok(Slot {
            place: normalized,
            declared,
            holds_reference,
        })
    }

    /// The variable `name` in the current frame, if assignment may touch it.
    fn writable_variable(&self, name: &Name) -> Result<&crate::frame::Variable, EvalError> {
        match self.frames.current().get(name) {
            Some(var) if var.is_constant => Err(assign_to_constant(name)),
            Some(var) => Ok(var),
            None if self.lookup(name).is_some() => Err(assign_to_constant(name)),
            None => Err(undefined_variable(name)),
        }
    }

    /// Value at a normalized place. The path never crosses a reference.
    fn slot_value(&self, place: &Place) -> Result<&Value, EvalError> {
        let mut value = match &place.root {
            Root::Var(name) => &self.writable_variable(name)?.value,
            Root::Chunk(index) => self.heap.deref(*index)?,
        };
        for step in &place.path {
            value = match (step, value) {
                (Step::Member(member), Value::Object(object)) => object
                    .get(member)
                    .ok_or_else(|| no_such_member(&object.class_name, member))?,
                (Step::Index(index), Value::Array(array)) => {
                    &array.elements[checked_index(index, array.elements.len())?]
                }
                (Step::Member(_), other) => return Err(invalid_operand(".", other)),
                (Step::Index(_), other) => return Err(invalid_operand("[]", other)),
            };
        }
        Ok(value)
    }

    fn slot_value_mut(&mut self, place: &Place) -> Result<&mut Value, EvalError> {
        let mut value = match &place.root {
            Root::Var(name) => {
                self.writable_variable(name)?;
                match self.frames.current_mut().get_mut(name) {
                    Some(var) => &mut var.value,
                    None => return Err(undefined_variable(name)),
                }
            }
            Root::Chunk(index) => self.heap.deref_mut(*index)?,
        };
        for step in &place.path {
            value = match (step, value) {
                (Step::Member(member), Value::Object(object)) => {
                    let class = object.class_name.clone();
                    object
                        .get_mut(member)
                        .ok_or_else(|| no_such_member(&class, member))?
                }
                (Step::Index(index), Value::Array(array)) => {
                    let position = checked_index(index, array.elements.len())?;
                    &mut array.elements[position]
                }
                (Step::Member(_), other) => return Err(invalid_operand(".", other)),
                (Step::Index(_), other) => return Err(invalid_operand("[]", other)),
            };
        }
        Ok(value)
    }
}

/// A run of `name .` pairs and index tokens.
fn is_path(tokens: &[Rpn<'_>]) -> bool {
    let mut rest = tokens;
    loop {
        rest = match rest {
            [] => return true,
            [Rpn::Ident(_), Rpn::Member, tail @ ..] | [Rpn::Index(_), tail @ ..] => tail,
            _ => return false,
        };
    }
}
