//! Brine Eval - the evaluator, runtime value model and garbage-collected
//! heap of the Brine interpreter.
//!
//! # Architecture
//!
//! - [`Value`]: the tagged runtime value; [`Heap`]: index-addressed chunk
//!   store with a free list; [`gc`]: mark-sweep collection rooted at the
//!   frame stack
//! - [`flatten`]: turns a parsed expression into one RPN stream
//! - [`Interpreter`]: the RPN stack machine and the statement executor
//! - [`natives`]: builtin functions callable by name
//!
//! All runtime errors are fatal and surface as [`EvalError`] carrying the
//! source line and the call trace at the point of failure.

pub mod errors;
pub mod flatten;
pub mod frame;
pub mod gc;
pub mod heap;
pub mod interpreter;
pub mod natives;
mod operators;
mod print_handler;
pub mod types;
pub mod value;

pub use errors::{BacktraceFrame, EvalBacktrace, EvalError, EvalErrorKind, EvalResult};
pub use frame::{CallStack, Frame, Variable};
pub use heap::{Heap, HeapError, HeapIndex};
pub use interpreter::{Interpreter, InterpreterBuilder, InterpreterConfig};
pub use natives::{Arity, NativeContext, NativeFunction, NativeRegistry};
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{
    buffer_handler, scripted_handler, silent_handler, stdout_handler, BufferPrintHandler,
    PrintHandlerImpl, SharedPrintHandler, StdoutPrintHandler,
};
pub use value::{ArrayValue, ClassValue, FunctionValue, ObjectValue, Value};

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests unwrap to fail loudly on unexpected state"
)]
mod tests;
