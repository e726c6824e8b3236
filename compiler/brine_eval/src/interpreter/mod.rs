//! Tree-walking interpreter.
//!
//! The interpreter owns all mutable runtime state: the heap, the frame
//! stack (which doubles as the collector's root set) and the collection
//! trigger. Work is split by concern:
//!
//! - `exec` runs statements and reports control flow as a [`Flow`]
//! - `rpn` flattens and executes expressions on an operand stack
//! - `call` invokes user functions, constructs objects and interpolates
//! - `place` resolves and writes assignment targets
//!
//! Every runtime error is fatal. The statement executor stamps the
//! innermost failing statement's line and the call trace onto the error
//! on its way out.

mod builder;
mod call;
mod exec;
mod place;
mod rpn;

pub use builder::InterpreterBuilder;
pub(crate) use exec::Flow;

use crate::errors::{
    reference_required, type_mismatch, undefined_variable, EvalError, EvalResult,
};
use crate::frame::{CallStack, Variable};
use crate::gc::{self, GcState};
use crate::heap::{Heap, HeapIndex};
use crate::natives::NativeRegistry;
use crate::print_handler::SharedPrintHandler;
use crate::types;
use crate::value::Value;
use brine_ir::{Name, Program, TypeName};

/// Tunables fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Maximum number of nested user function calls.
    pub max_call_depth: usize,
    /// Allocations before the first collection.
    pub gc_initial_threshold: usize,
    /// When false, collections only happen on explicit request.
    pub gc_enabled: bool,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            max_call_depth: 1024,
            gc_initial_threshold: 5,
            gc_enabled: true,
        }
    }
}

pub struct Interpreter {
    pub(crate) heap: Heap,
    pub(crate) frames: CallStack,
    pub(crate) gc: GcState,
    pub(crate) config: InterpreterConfig,
    pub(crate) natives: NativeRegistry,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) source_name: Name,
}

impl Interpreter {
    /// Interpreter with default configuration, builtins and stdout output.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    /// Execute every top-level statement of `program` in order.
    #[tracing::instrument(level = "debug", skip_all, fields(source = %program.source_name))]
    pub fn run(&mut self, program: &Program) -> Result<(), EvalError> {
        self.source_name = program.source_name.clone();
        for stmt in &program.statements {
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    /// Bind the command-line arguments as the constant `str[] argv`.
    pub fn bind_argv(&mut self, args: Vec<String>) {
        let elements = args.iter().map(|arg| Value::str(arg)).collect();
        let ty = TypeName::array_of(&TypeName::new(types::STR));
        self.frames.main_mut().declare(
            Name::new("argv"),
            Variable::constant(ty, Value::array(TypeName::new(types::STR), elements)),
        );
    }

    /// Value of a top-level variable, with references followed.
    pub fn global(&self, name: &str) -> Option<Value> {
        let var = self.frames.main().get(name)?;
        self.deref_value(&var.value).ok().cloned()
    }

    /// Display form of `value` as `print` would write it.
    pub fn display(&self, value: &Value) -> String {
        value.display(&self.heap).to_string()
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Number of completed collections.
    pub fn collections(&self) -> usize {
        self.gc.collections()
    }

    /// Number of user function calls currently active.
    pub fn frames_depth(&self) -> usize {
        self.frames.depth()
    }

    /// Run a full collection now. Returns the number of chunks freed.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn collect_garbage(&mut self) -> usize {
        let freed = gc::collect(&mut self.heap, self.frames.roots());
        let live = self.heap.live_count();
        self.gc.reset(live);
        tracing::debug!(freed, live, threshold = self.gc.threshold(), "collected");
        freed
    }

    /// Count a heap-allocating declaration and collect if one is due.
    pub(crate) fn note_allocation(&mut self) {
        if self.gc.note_allocation() {
            self.collect_garbage();
        }
    }

    /// Variable visible under `name`: the current frame first, then the
    /// constants of the top level (functions, classes and `const` globals).
    pub(crate) fn lookup(&self, name: &str) -> Option<&Variable> {
        self.frames.current().get(name).or_else(|| {
            self.frames
                .main()
                .get(name)
                .filter(|var| var.is_constant)
        })
    }

    pub(crate) fn lookup_value(&self, name: &Name) -> Result<&Value, EvalError> {
        self.lookup(name)
            .map(|var| &var.value)
            .ok_or_else(|| undefined_variable(name))
    }

    /// Follow a chain of references to the data it ends at.
    pub(crate) fn deref_value<'a>(&'a self, value: &'a Value) -> Result<&'a Value, EvalError> {
        match value {
            Value::Ref(index) => {
                let terminal = self.heap.terminal(*index)?;
                Ok(self.heap.deref(terminal)?)
            }
            other => Ok(other),
        }
    }

    /// Data behind a stack value: placeholders are looked up, references
    /// followed. Borrowed from the frame or the heap.
    pub(crate) fn resolve<'a>(&'a self, value: &'a Value) -> Result<&'a Value, EvalError> {
        match value {
            Value::Ident(name) => {
                let stored = self.lookup_value(name)?;
                self.deref_value(stored)
            }
            other => self.deref_value(other),
        }
    }

    /// Owned copy of the data behind a stack value.
    pub(crate) fn resolve_owned(&self, value: Value) -> EvalResult {
        match value {
            Value::Ident(_) | Value::Ref(_) => self.resolve(&value).map(Value::copy),
            data => Ok(data),
        }
    }

    /// Like [`Self::resolve`], also reporting the heap chunk the data lives
    /// in when it was reached through a reference.
    pub(crate) fn resolve_with_origin<'a>(
        &'a self,
        value: &'a Value,
    ) -> Result<(&'a Value, Option<HeapIndex>), EvalError> {
        let stored = match value {
            Value::Ident(name) => self.lookup_value(name)?,
            other => other,
        };
        match stored {
            Value::Ref(index) => {
                let terminal = self.heap.terminal(*index)?;
                Ok((self.heap.deref(terminal)?, Some(terminal)))
            }
            other => Ok((other, None)),
        }
    }

    /// Accept `value` for a `ref` slot of type `declared`: it must be a
    /// reference whose target has a compatible type.
    pub(crate) fn expect_reference(
        &self,
        declared: &TypeName,
        value: Value,
        what: impl FnOnce() -> String,
    ) -> EvalResult {
        if !matches!(value, Value::Ref(_)) {
            return Err(reference_required(what(), &value));
        }
        let actual = types::realized_type(&value, &self.heap);
        if !types::is_compatible(declared, &actual) {
            return Err(type_mismatch(declared.as_str(), actual.as_str()));
        }
        Ok(value)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap to fail loudly on unexpected state")]
mod tests;
