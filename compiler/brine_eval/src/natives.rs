//! Native functions.
//!
//! Every native has the same shape: it receives its already evaluated
//! arguments and a [`NativeContext`] giving access to the heap, value
//! display, the call trace and the print handler. Arity is checked before
//! the arguments are evaluated. Natives marked `takes_references` get heap
//! references as they are instead of copies of the data behind them.

mod conversion;
mod io;
mod math;
mod memory;

use crate::errors::{type_mismatch, wrong_arg_count, EvalBacktrace, EvalError, EvalResult};
use crate::heap::Heap;
use crate::interpreter::Interpreter;
use crate::print_handler::SharedPrintHandler;
use crate::types::{self, realized_type};
use crate::value::Value;
use brine_ir::TypeName;
use rustc_hash::FxHashMap;
use std::fmt;

/// Number of arguments a native accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

pub type NativeFn = fn(&[Value], &mut NativeContext<'_>) -> EvalResult;

#[derive(Copy, Clone)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: Arity,
    pub takes_references: bool,
    pub execute: NativeFn,
}

impl NativeFunction {
    pub const fn new(name: &'static str, arity: Arity, execute: NativeFn) -> Self {
        NativeFunction {
            name,
            arity,
            takes_references: false,
            execute,
        }
    }

    /// Pass heap references through instead of copying the data.
    #[must_use]
    pub const fn by_reference(mut self) -> Self {
        self.takes_references = true;
        self
    }

    pub fn check_arity(&self, got: usize) -> Result<(), EvalError> {
        match self.arity {
            _ if self.arity.accepts(got) => Ok(()),
            Arity::Exact(expected) | Arity::AtLeast(expected) => {
                Err(wrong_arg_count(self.name, expected, got))
            }
        }
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("takes_references", &self.takes_references)
            .finish_non_exhaustive()
    }
}

/// Natives callable by name.
#[derive(Clone, Debug, Default)]
pub struct NativeRegistry {
    functions: FxHashMap<&'static str, NativeFunction>,
}

impl NativeRegistry {
    /// A registry with no natives.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every builtin: I/O, conversion, math and heap natives.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        io::register(&mut registry);
        conversion::register(&mut registry);
        math::register(&mut registry);
        memory::register(&mut registry);
        registry
    }

    /// Add `native`, replacing any native of the same name.
    pub fn register(&mut self, native: NativeFunction) {
        self.functions.insert(native.name, native);
    }

    pub fn get(&self, name: &str) -> Option<NativeFunction> {
        self.functions.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// What a native may touch while it runs.
pub struct NativeContext<'i> {
    interpreter: &'i mut Interpreter,
}

impl<'i> NativeContext<'i> {
    pub(crate) fn new(interpreter: &'i mut Interpreter) -> Self {
        NativeContext { interpreter }
    }

    pub fn heap(&self) -> &Heap {
        &self.interpreter.heap
    }

    pub fn display(&self, value: &Value) -> String {
        self.interpreter.display(value)
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.interpreter.print_handler
    }

    /// Call trace at the native's call site, innermost first.
    pub fn backtrace(&self) -> EvalBacktrace {
        self.interpreter.frames.backtrace()
    }

    pub fn collect_garbage(&mut self) -> usize {
        self.interpreter.collect_garbage()
    }

    /// The data at the end of a reference chain; other values as is.
    pub fn deref<'a>(&'a self, value: &'a Value) -> Result<&'a Value, EvalError> {
        self.interpreter.deref_value(value)
    }

    pub fn realized_type(&self, value: &Value) -> TypeName {
        realized_type(value, &self.interpreter.heap)
    }

    /// Free-form error, located at the call site like any other.
    pub fn error(&self, message: impl Into<String>) -> EvalError {
        EvalError::new(message)
    }
}

// Argument helpers

pub(crate) fn expect_num(value: &Value) -> Result<f64, EvalError> {
    match value {
        Value::Num(n) => Ok(*n),
        other => Err(type_mismatch(
            types::NUM,
            types::inline_type(other).as_str(),
        )),
    }
}

pub(crate) fn expect_str(value: &Value) -> Result<&str, EvalError> {
    match value {
        Value::Str(s) => Ok(&**s),
        other => Err(type_mismatch(
            types::STR,
            types::inline_type(other).as_str(),
        )),
    }
}
