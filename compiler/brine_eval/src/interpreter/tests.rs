use super::*;
use crate::errors::EvalErrorKind;
use crate::natives::{Arity, NativeContext, NativeFunction};
use crate::print_handler::buffer_handler;
use pretty_assertions::assert_eq;

fn parse(source: &str) -> Program {
    brine_parse::parse_source(source, "unit.brine").unwrap()
}

fn buffered() -> (Interpreter, SharedPrintHandler) {
    let handler = buffer_handler();
    let interp = InterpreterBuilder::new()
        .print_handler(handler.clone())
        .build();
    (interp, handler)
}

#[test]
fn test_globals_are_visible_after_run() {
    let (mut interp, _) = buffered();
    interp
        .run(&parse("alloc int[] xs = [1, 2];\nstr s = \"hi\";"))
        .unwrap();
    assert_eq!(
        interp.global("xs"),
        Some(Value::array(TypeName::new("int"), vec![Value::Num(1.0), Value::Num(2.0)]))
    );
    assert_eq!(interp.global("s"), Some(Value::str("hi")));
    assert_eq!(interp.global("missing"), None);
    assert_eq!(interp.heap().live_count(), 1);
}

#[test]
fn test_argv_is_a_constant_string_array() {
    let (mut interp, handler) = buffered();
    interp.bind_argv(vec!["a".to_string(), "b".to_string()]);
    interp
        .run(&parse("println(len(argv), argv[0], type(argv));"))
        .unwrap();
    assert_eq!(handler.get_output(), "2 a str[]\n");

    let err = interp.run(&parse("argv[0] = \"z\";")).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ConstantAssignment {
            name: Name::new("argv")
        }
    );
}

#[test]
fn test_state_persists_across_runs() {
    let (mut interp, handler) = buffered();
    interp.run(&parse("int n = 41;")).unwrap();
    interp.run(&parse("n += 1;\nprintln(n);")).unwrap();
    assert_eq!(handler.get_output(), "42\n");
}

#[test]
fn test_errors_carry_source_and_line() {
    let (mut interp, _) = buffered();
    let err = interp
        .run(&parse("int a = 1;\n\nint b = a / 0;"))
        .unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    assert_eq!(err.source_name.as_deref(), Some("unit.brine"));
    assert_eq!(err.line, Some(3));
    let trace = err.backtrace.unwrap();
    assert_eq!(trace.len(), 1);
    assert_eq!(trace.frames()[0].name, "<main>");
}

#[test]
fn test_recursion_limit_leaves_no_frames() {
    let handler = buffer_handler();
    let mut interp = InterpreterBuilder::new()
        .print_handler(handler)
        .config(InterpreterConfig {
            max_call_depth: 10,
            ..InterpreterConfig::default()
        })
        .build();
    let err = interp
        .run(&parse("func f(int n) { return f(n + 1); }\nf(0);"))
        .unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::RecursionLimit { depth: 10 });
    assert_eq!(err.backtrace.unwrap().len(), 11);
    assert_eq!(interp.frames_depth(), 0);
}

#[test]
fn test_explicit_collection_updates_threshold() {
    let (mut interp, _) = buffered();
    interp
        .run(&parse("alloc int a = 1;\nalloc int b = 2;\nalloc int a = 3;"))
        .unwrap();
    assert_eq!(interp.collect_garbage(), 1);
    assert_eq!(interp.collections(), 1);
    assert_eq!(interp.gc.threshold(), 4);
}

#[test]
fn test_disabled_collector_never_runs_on_its_own() {
    let handler = buffer_handler();
    let mut interp = InterpreterBuilder::new()
        .print_handler(handler)
        .config(InterpreterConfig {
            gc_enabled: false,
            gc_initial_threshold: 1,
            ..InterpreterConfig::default()
        })
        .build();
    interp
        .run(&parse("for (int i = 0; i < 6; i += 1) { alloc int x = i; }"))
        .unwrap();
    assert_eq!(interp.collections(), 0);
    assert_eq!(interp.heap().live_count(), 6);
}

#[test]
fn test_empty_registry_has_no_builtins() {
    let mut interp = InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .natives(NativeRegistry::empty())
        .build();
    let err = interp.run(&parse("println(1);")).unwrap_err();
    assert_eq!(err.message, "undefined variable `println`");
}

fn twice(args: &[Value], _: &mut NativeContext<'_>) -> EvalResult {
    match args[0] {
        Value::Num(n) => Ok(Value::Num(n * 2.0)),
        ref other => Err(type_mismatch(types::NUM, types::inline_type(other).as_str())),
    }
}

fn depth(_: &[Value], ctx: &mut NativeContext<'_>) -> EvalResult {
    Ok(Value::Num(ctx.backtrace().len() as f64))
}

#[test]
fn test_custom_natives() {
    let mut natives = NativeRegistry::with_builtins();
    natives.register(NativeFunction::new("twice", Arity::Exact(1), twice));
    natives.register(NativeFunction::new("depth", Arity::Exact(0), depth));
    let handler = buffer_handler();
    let mut interp = InterpreterBuilder::new()
        .print_handler(handler.clone())
        .natives(natives)
        .build();
    interp
        .run(&parse("func inner() -> int { return depth(); }\nprintln(twice(21), depth(), inner());"))
        .unwrap();
    assert_eq!(handler.get_output(), "42 1 2\n");
}

#[test]
fn test_display_follows_references() {
    let (mut interp, _) = buffered();
    interp.run(&parse("alloc str s = \"deep\";")).unwrap();
    let stored = interp.frames.main().get("s").unwrap().value.clone();
    assert!(matches!(stored, Value::Ref(_)));
    assert_eq!(interp.display(&stored), "deep");
}
