//! Brine command-line driver.
//!
//! Reads a script, runs it with the command-line arguments bound as
//! `argv`, and renders any syntax or runtime error against the source.

mod report;
mod tracing_setup;

pub use report::{render_error, syntax_message};
pub use tracing_setup::init_tracing;

use brine_eval::{EvalError, InterpreterBuilder, InterpreterConfig, SharedPrintHandler};
use brine_parse::SyntaxError;
use std::io;
use thiserror::Error;

/// Why a script did not run to completion.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot read `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Runtime(#[from] EvalError),
}

/// Read a script from disk.
pub fn read_source(path: &str) -> Result<String, RunError> {
    std::fs::read_to_string(path).map_err(|source| RunError::Read {
        path: path.to_string(),
        source,
    })
}

/// Lex, parse and run `source`. Output goes to `handler`.
#[tracing::instrument(level = "debug", skip(source, args, config, handler))]
pub fn run_source(
    source: &str,
    name: &str,
    args: Vec<String>,
    config: InterpreterConfig,
    handler: SharedPrintHandler,
) -> Result<(), RunError> {
    let program = brine_parse::parse_source(source, name)?;
    let mut interpreter = InterpreterBuilder::new()
        .print_handler(handler)
        .config(config)
        .build();
    interpreter.bind_argv(args);
    interpreter.run(&program)?;
    tracing::debug!(
        collections = interpreter.collections(),
        live = interpreter.heap().live_count(),
        "finished"
    );
    Ok(())
}

/// Interpreter settings, with `BRINE_MAX_DEPTH` overriding the call
/// depth limit.
pub fn config_from_env() -> InterpreterConfig {
    let mut config = InterpreterConfig::default();
    if let Ok(value) = std::env::var("BRINE_MAX_DEPTH") {
        match value.parse() {
            Ok(depth) => config.max_call_depth = depth,
            Err(_) => tracing::warn!(%value, "ignoring invalid BRINE_MAX_DEPTH"),
        }
    }
    config
}
