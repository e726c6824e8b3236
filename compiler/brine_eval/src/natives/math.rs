//! Math natives over `num`.

use super::{expect_num, Arity, NativeContext, NativeFn, NativeFunction, NativeRegistry};
use crate::errors::EvalResult;
use crate::value::Value;

macro_rules! unary_math {
    ($($name:ident => $op:path),* $(,)?) => {
        $(
            fn $name(args: &[Value], _: &mut NativeContext<'_>) -> EvalResult {
                Ok(Value::Num($op(expect_num(&args[0])?)))
            }
        )*

        const UNARY: &[(&str, NativeFn)] = &[$((stringify!($name), $name)),*];
    };
}

unary_math! {
    sqrt => f64::sqrt,
    sin => f64::sin,
    cos => f64::cos,
    tan => f64::tan,
    abs => f64::abs,
    floor => f64::floor,
}

pub(super) fn register(registry: &mut NativeRegistry) {
    for &(name, execute) in UNARY {
        registry.register(NativeFunction::new(name, Arity::Exact(1), execute));
    }
    registry.register(NativeFunction::new("pow", Arity::Exact(2), pow));
}

fn pow(args: &[Value], _: &mut NativeContext<'_>) -> EvalResult {
    let base = expect_num(&args[0])?;
    let exponent = expect_num(&args[1])?;
    Ok(Value::Num(base.powf(exponent)))
}
