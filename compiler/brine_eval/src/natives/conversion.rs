//! Conversion and inspection natives.

use super::{Arity, NativeContext, NativeFunction, NativeRegistry};
use crate::errors::{invalid_conversion, type_mismatch, EvalError, EvalResult};
use crate::types;
use crate::value::Value;

pub(super) fn register(registry: &mut NativeRegistry) {
    registry.register(NativeFunction::new("str", Arity::Exact(1), to_str));
    registry.register(NativeFunction::new("num", Arity::Exact(1), to_num));
    registry.register(NativeFunction::new("int", Arity::Exact(1), to_int));
    registry.register(NativeFunction::new("type", Arity::Exact(1), type_of));
    registry.register(NativeFunction::new("len", Arity::Exact(1), len));
}

fn to_str(args: &[Value], ctx: &mut NativeContext<'_>) -> EvalResult {
    Ok(Value::str(&ctx.display(&args[0])))
}

fn to_num(args: &[Value], ctx: &mut NativeContext<'_>) -> EvalResult {
    parse_num(&args[0], types::NUM, ctx).map(Value::Num)
}

/// Truncates toward zero.
fn to_int(args: &[Value], ctx: &mut NativeContext<'_>) -> EvalResult {
    let n = parse_num(&args[0], types::INT, ctx)?;
    if !n.is_finite() {
        return Err(invalid_conversion(&ctx.display(&args[0]), types::INT));
    }
    Ok(Value::Num(n.trunc()))
}

fn parse_num(
    value: &Value,
    target: &'static str,
    ctx: &NativeContext<'_>,
) -> Result<f64, EvalError> {
    match value {
        Value::Num(n) => Ok(*n),
        Value::Str(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid_conversion(text, target)),
        Value::Bool(b) => Ok(f64::from(u8::from(*b))),
        other => Err(type_mismatch(target, ctx.realized_type(other).as_str())),
    }
}

fn type_of(args: &[Value], ctx: &mut NativeContext<'_>) -> EvalResult {
    Ok(Value::str(ctx.realized_type(&args[0]).as_str()))
}

/// Element count of an array, character count of a string.
fn len(args: &[Value], ctx: &mut NativeContext<'_>) -> EvalResult {
    let count = match &args[0] {
        Value::Array(array) => array.elements.len(),
        Value::Str(text) => text.chars().count(),
        other => {
            return Err(type_mismatch(
                "array or str",
                ctx.realized_type(other).as_str(),
            ))
        }
    };
    Ok(Value::Num(count as f64))
}
