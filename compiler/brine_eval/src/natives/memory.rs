//! Heap natives: receiver binding, reference identity and the collector.

use super::{Arity, NativeContext, NativeFunction, NativeRegistry};
use crate::errors::{reference_required, type_mismatch, EvalError, EvalResult};
use crate::heap::HeapIndex;
use crate::types;
use crate::value::{FunctionValue, Value};

pub(super) fn register(registry: &mut NativeRegistry) {
    registry.register(NativeFunction::new("bind", Arity::Exact(2), bind).by_reference());
    registry.register(NativeFunction::new("same", Arity::Exact(2), same).by_reference());
    registry.register(NativeFunction::new("collect", Arity::Exact(0), collect));
    registry.register(NativeFunction::new("heap_live", Arity::Exact(0), heap_live));
}

/// Chunk at the end of the reference chain starting at `value`.
fn target(value: &Value, what: &str, ctx: &NativeContext<'_>) -> Result<HeapIndex, EvalError> {
    match value {
        Value::Ref(index) => Ok(ctx.heap().terminal(*index)?),
        other => Err(reference_required(what, other)),
    }
}

/// `bind(func, ref obj)`: the function with `this` bound to the object.
fn bind(args: &[Value], ctx: &mut NativeContext<'_>) -> EvalResult {
    let func = match ctx.deref(&args[0])? {
        Value::Function(func) => func.clone(),
        other => {
            return Err(type_mismatch(
                types::FUNC,
                ctx.realized_type(other).as_str(),
            ))
        }
    };
    let receiver = target(&args[1], "the receiver of `bind`", ctx)?;
    let object = ctx.heap().deref(receiver)?;
    if !matches!(object, Value::Object(_)) {
        return Err(type_mismatch(types::OBJ, ctx.realized_type(object).as_str()));
    }
    Ok(Value::Function(FunctionValue {
        this_ref: Some(receiver),
        ..func
    }))
}

/// `same(ref a, ref b)`: do both references lead to the same chunk?
fn same(args: &[Value], ctx: &mut NativeContext<'_>) -> EvalResult {
    let a = target(&args[0], "the first argument of `same`", ctx)?;
    let b = target(&args[1], "the second argument of `same`", ctx)?;
    Ok(Value::Bool(a == b))
}

/// Force a collection. Returns the number of chunks freed.
fn collect(_: &[Value], ctx: &mut NativeContext<'_>) -> EvalResult {
    Ok(Value::Num(ctx.collect_garbage() as f64))
}

fn heap_live(_: &[Value], ctx: &mut NativeContext<'_>) -> EvalResult {
    Ok(Value::Num(ctx.heap().live_count() as f64))
}
