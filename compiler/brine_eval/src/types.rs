//! Runtime type names and the compatibility rules used by declarations,
//! assignment, argument passing and return checks.
//!
//! A value's realized type is `int` for integral numbers, `num` otherwise,
//! `E[]` for arrays, the class name for objects and the plain kind name for
//! everything else. References are looked through.

use crate::errors::{type_mismatch, EvalError};
use crate::heap::Heap;
use crate::value::Value;
use brine_ir::TypeName;

pub const NUM: &str = "num";
pub const INT: &str = "int";
pub const STR: &str = "str";
pub const BOOL: &str = "bool";
pub const OBJ: &str = "obj";
pub const FUNC: &str = "func";
pub const CLASS: &str = "class";
pub const VOID: &str = "void";
pub const VAR: &str = "var";

const BUILTIN: [&str; 9] = [NUM, INT, STR, BOOL, OBJ, FUNC, CLASS, VOID, VAR];

/// Realized type of `value`, following references through `heap`.
pub fn realized_type(value: &Value, heap: &Heap) -> TypeName {
    match value {
        Value::Ref(index) => match heap.deref(*index) {
            Ok(target) => realized_type(target, heap),
            Err(_) => TypeName::new("null"),
        },
        other => inline_type(other),
    }
}

/// Realized type without touching the heap. A `Ref` reports `ref`.
pub fn inline_type(value: &Value) -> TypeName {
    match value {
        Value::Num(_) if value.is_integer() => TypeName::new(INT),
        Value::Num(_) => TypeName::new(NUM),
        Value::Str(_) => TypeName::new(STR),
        Value::Bool(_) => TypeName::new(BOOL),
        Value::Array(array) => TypeName::array_of(&array.element_type),
        Value::Object(object) => TypeName::new(&object.class_name),
        Value::Function(_) => TypeName::new(FUNC),
        Value::Class(_) => TypeName::new(CLASS),
        Value::Ref(_) => TypeName::new("ref"),
        Value::Ident(_) => TypeName::new("identifier"),
        Value::Void => TypeName::new(VOID),
        Value::Unknown => TypeName::new("unknown"),
    }
}

/// Names a user class rather than a built-in or array type.
pub fn is_class_name(ty: &TypeName) -> bool {
    !ty.is_array() && !BUILTIN.contains(&ty.as_str())
}

/// Can a slot declared `declared` hold a value whose realized type is
/// `actual`?
pub fn is_compatible(declared: &TypeName, actual: &TypeName) -> bool {
    if declared == actual || declared.as_str() == VAR {
        return true;
    }
    match (declared.as_str(), actual.as_str()) {
        (NUM, INT) => return true,
        (OBJ, _) if is_class_name(actual) => return true,
        _ => {}
    }
    match (declared.element_type(), actual.element_type()) {
        // an empty literal has no element type of its own yet
        (Some(de), Some(ae)) => ae.as_str() == VAR || is_compatible(&de, &ae),
        _ => false,
    }
}

/// Check `value` against `declared` and retag arrays with the declared
/// element type, so `num[] xs = [1, 2]` holds a `num[]`.
pub fn conform(value: Value, declared: &TypeName, heap: &Heap) -> Result<Value, EvalError> {
    let actual = realized_type(&value, heap);
    if !is_compatible(declared, &actual) {
        return Err(type_mismatch(declared.as_str(), actual.as_str()));
    }
    Ok(retag(value, declared))
}

fn retag(value: Value, declared: &TypeName) -> Value {
    match (value, declared.element_type()) {
        (Value::Array(mut array), Some(element)) if element.as_str() != VAR => {
            array.elements = array
                .elements
                .into_iter()
                .map(|e| retag(e, &element))
                .collect();
            array.element_type = element;
            Value::Array(array)
        }
        (value, _) => value,
    }
}

/// Value of a declaration without an initializer.
pub fn default_value(ty: &TypeName) -> Value {
    if let Some(element) = ty.element_type() {
        return Value::array(element, Vec::new());
    }
    match ty.as_str() {
        NUM | INT => Value::Num(0.0),
        STR => Value::str(""),
        BOOL => Value::Bool(false),
        _ => Value::Void,
    }
}
