//! Console, file and process natives.

use super::{expect_num, expect_str, Arity, NativeContext, NativeFunction, NativeRegistry};
use crate::errors::{io_error, EvalResult};
use crate::value::Value;
use std::time::Duration;

pub(super) fn register(registry: &mut NativeRegistry) {
    registry.register(NativeFunction::new("print", Arity::AtLeast(0), print));
    registry.register(NativeFunction::new("println", Arity::AtLeast(0), println));
    registry.register(NativeFunction::new("input", Arity::Exact(0), input));
    registry.register(NativeFunction::new("read_file", Arity::Exact(1), read_file));
    registry.register(NativeFunction::new("write_file", Arity::Exact(2), write_file));
    registry.register(NativeFunction::new("sleep", Arity::Exact(1), sleep));
}

/// Display forms joined by single spaces.
fn joined(args: &[Value], ctx: &NativeContext<'_>) -> String {
    args.iter()
        .map(|arg| ctx.display(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print(args: &[Value], ctx: &mut NativeContext<'_>) -> EvalResult {
    ctx.print_handler().print(&joined(args, ctx));
    Ok(Value::Void)
}

fn println(args: &[Value], ctx: &mut NativeContext<'_>) -> EvalResult {
    ctx.print_handler().println(&joined(args, ctx));
    Ok(Value::Void)
}

/// One line of input; the empty string at end of input.
fn input(_: &[Value], ctx: &mut NativeContext<'_>) -> EvalResult {
    let line = ctx.print_handler().read_line().unwrap_or_default();
    Ok(Value::str(&line))
}

fn read_file(args: &[Value], _: &mut NativeContext<'_>) -> EvalResult {
    let path = expect_str(&args[0])?;
    std::fs::read_to_string(path)
        .map(|text| Value::str(&text))
        .map_err(|err| io_error("read", path, &err))
}

fn write_file(args: &[Value], ctx: &mut NativeContext<'_>) -> EvalResult {
    let path = expect_str(&args[0])?;
    let text = match &args[1] {
        Value::Str(text) => text.to_string(),
        other => ctx.display(other),
    };
    std::fs::write(path, text).map_err(|err| io_error("write", path, &err))?;
    Ok(Value::Void)
}

/// Block the process for a number of milliseconds.
fn sleep(args: &[Value], ctx: &mut NativeContext<'_>) -> EvalResult {
    let millis = expect_num(&args[0])?;
    let duration = Duration::try_from_secs_f64(millis / 1000.0)
        .map_err(|_| ctx.error(format!("cannot sleep for {millis} milliseconds")))?;
    std::thread::sleep(duration);
    Ok(Value::Void)
}
