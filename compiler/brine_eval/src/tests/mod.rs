//! Evaluator tests that run whole programs, plus operator and property
//! tests too large to live inline.

mod heap_tests;

use crate::{
    buffer_handler, EvalError, Interpreter, InterpreterBuilder, InterpreterConfig,
    SharedPrintHandler,
};

pub(crate) const SOURCE_NAME: &str = "test.brine";

/// Result of running a program against a capturing print handler.
pub(crate) struct Outcome {
    pub interp: Interpreter,
    pub result: Result<(), EvalError>,
    pub output: String,
}

pub(crate) fn run_with(source: &str, builder: InterpreterBuilder) -> Outcome {
    run_with_handler(source, builder, buffer_handler())
}

pub(crate) fn run_with_handler(
    source: &str,
    builder: InterpreterBuilder,
    handler: SharedPrintHandler,
) -> Outcome {
    let program = brine_parse::parse_source(source, SOURCE_NAME).expect("source should parse");
    let mut interp = builder.print_handler(handler.clone()).build();
    let result = interp.run(&program);
    Outcome {
        interp,
        result,
        output: handler.get_output(),
    }
}

pub(crate) fn run(source: &str) -> Outcome {
    run_with(source, InterpreterBuilder::new())
}

pub(crate) fn run_config(source: &str, config: InterpreterConfig) -> Outcome {
    run_with(source, InterpreterBuilder::new().config(config))
}

/// Output of a program that must succeed.
pub(crate) fn output_of(source: &str) -> String {
    let outcome = run(source);
    if let Err(err) = outcome.result {
        panic!("program failed: {err} (line {:?})", err.line);
    }
    outcome.output
}

/// Error of a program that must fail.
pub(crate) fn error_of(source: &str) -> EvalError {
    match run(source).result {
        Ok(()) => panic!("program should have failed"),
        Err(err) => err,
    }
}
