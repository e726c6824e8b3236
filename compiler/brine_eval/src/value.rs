//! Runtime values.
//!
//! `Value` is the only runtime datum. Three variants are not data:
//! - `Ident` is an lvalue placeholder produced by a bare identifier and
//!   resolved against the current frame before any operator reads it.
//! - `Ref` defers to a heap chunk; the real data lives there.
//! - `Unknown` marks a value nothing has produced yet.
//!
//! Values have copy semantics. `Clone` is the deep copy used for assignment
//! and argument passing: arrays and objects are duplicated element by
//! element, while function bodies and class layouts stay shared.

use crate::heap::{Heap, HeapIndex};
use brine_ir::{FunctionDef, Name, Param, TypeName};
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Num(f64),
    Str(Rc<str>),
    Bool(bool),
    Array(ArrayValue),
    Object(ObjectValue),
    Function(FunctionValue),
    Class(ClassValue),
    Ref(HeapIndex),
    Ident(Name),
    Void,
    Unknown,
}

/// Homogeneous array tagged with its element type.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayValue {
    pub element_type: TypeName,
    pub elements: Vec<Value>,
}

/// Instance of a user class. Members keep declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectValue {
    pub class_name: Name,
    /// Declared member slots, shared with the class.
    pub layout: Rc<[Param]>,
    pub members: Vec<Value>,
}

/// A function literal plus its optional receiver binding.
#[derive(Clone, Debug)]
pub struct FunctionValue {
    pub def: Rc<FunctionDef>,
    /// Heap chunk bound as `this` inside the body.
    pub this_ref: Option<HeapIndex>,
    /// Member name the function was last read through, for traces.
    pub bound_name: Option<Name>,
}

/// A class used as a constructor.
#[derive(Clone, Debug)]
pub struct ClassValue {
    pub name: Name,
    pub members: Rc<[Param]>,
}

impl Value {
    pub fn str(text: &str) -> Self {
        Value::Str(Rc::from(text))
    }

    pub fn array(element_type: TypeName, elements: Vec<Value>) -> Self {
        Value::Array(ArrayValue {
            element_type,
            elements,
        })
    }

    /// True for an lvalue placeholder.
    #[inline]
    pub fn is_lvalue(&self) -> bool {
        matches!(self, Value::Ident(_))
    }

    /// True for a `Num` holding a mathematical integer.
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Num(n) if is_integral(*n))
    }

    /// Deep copy: arrays and objects member by member, functions shallow.
    #[inline]
    #[must_use]
    pub fn copy(&self) -> Value {
        self.clone()
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Integral `Num` as `i64`. `None` for fractions and for integers
    /// outside the `i64` range.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Num(n) if is_integral(*n) && (I64_MIN..I64_END).contains(n) => {
                Some(*n as i64)
            }
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Short description naming the kind and, for scalars, the value.
    /// Used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Value::Num(n) => format!("num {}", format_num(*n)),
            Value::Str(s) => format!("str {s:?}"),
            Value::Bool(b) => format!("bool {b}"),
            Value::Array(a) => format!("{}[] of length {}", a.element_type, a.elements.len()),
            Value::Object(o) => format!("object of class `{}`", o.class_name),
            Value::Function(_) => "function".to_string(),
            Value::Class(c) => format!("class `{}`", c.name),
            Value::Ref(index) => format!("reference to {index}"),
            Value::Ident(name) => format!("identifier `{name}`"),
            Value::Void => "void".to_string(),
            Value::Unknown => "unknown".to_string(),
        }
    }

    /// Display form, following references through `heap`.
    pub fn display<'a>(&'a self, heap: &'a Heap) -> Displayed<'a> {
        Displayed { value: self, heap }
    }
}

impl ObjectValue {
    pub fn position(&self, member: &str) -> Option<usize> {
        self.layout.iter().position(|p| p.name == *member)
    }

    pub fn get(&self, member: &str) -> Option<&Value> {
        self.position(member).map(|i| &self.members[i])
    }

    pub fn get_mut(&mut self, member: &str) -> Option<&mut Value> {
        self.position(member).map(|i| &mut self.members[i])
    }
}

impl FunctionValue {
    pub fn new(def: Rc<FunctionDef>) -> Self {
        FunctionValue {
            def,
            this_ref: None,
            bound_name: None,
        }
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.def, &other.def) && self.this_ref == other.this_ref
    }
}

impl PartialEq for ClassValue {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Rc::ptr_eq(&self.members, &other.members)
    }
}

// `i64::MAX` is not representable; 2^63 is the first value past it.
const I64_MIN: f64 = -9_223_372_036_854_775_808.0;
const I64_END: f64 = 9_223_372_036_854_775_808.0;

#[inline]
pub(crate) fn is_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0
}

/// Integral numbers print without a fractional part.
pub fn format_num(n: f64) -> String {
    if n == 0.0 {
        // normalizes -0
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// [`Value`] paired with the heap for `Display`.
pub struct Displayed<'a> {
    value: &'a Value,
    heap: &'a Heap,
}

impl fmt::Display for Displayed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut visiting = Vec::new();
        write_value(f, self.value, self.heap, &mut visiting)
    }
}

/// `visiting` holds the chunks on the current path so cyclic structures
/// print a marker instead of recursing forever.
fn write_value(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    heap: &Heap,
    visiting: &mut Vec<HeapIndex>,
) -> fmt::Result {
    match value {
        Value::Num(n) => f.write_str(&format_num(*n)),
        Value::Str(s) => f.write_str(s),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Array(array) => {
            f.write_str("[")?;
            for (i, element) in array.elements.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, element, heap, visiting)?;
            }
            f.write_str("]")
        }
        Value::Object(object) => {
            write!(f, "{} {{", object.class_name)?;
            for (i, (param, member)) in object.layout.iter().zip(&object.members).enumerate() {
                f.write_str(if i == 0 { " " } else { ", " })?;
                write!(f, "{}: ", param.name)?;
                write_value(f, member, heap, visiting)?;
            }
            if object.members.is_empty() {
                f.write_str("}")
            } else {
                f.write_str(" }")
            }
        }
        Value::Function(func) => match &func.bound_name {
            Some(name) => write!(f, "<func {name}>"),
            None => f.write_str("<func>"),
        },
        Value::Class(class) => write!(f, "<class {}>", class.name),
        Value::Ref(index) => {
            if visiting.contains(index) {
                return write!(f, "<cycle {index}>");
            }
            match heap.deref(*index) {
                Ok(target) => {
                    visiting.push(*index);
                    let result = write_value(f, target, heap, visiting);
                    visiting.pop();
                    result
                }
                Err(_) => write!(f, "<dangling {index}>"),
            }
        }
        Value::Ident(name) => f.write_str(name),
        Value::Void => f.write_str("void"),
        Value::Unknown => f.write_str("unknown"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap to fail loudly on unexpected state")]
mod tests;
