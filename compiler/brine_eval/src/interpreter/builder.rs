//! `InterpreterBuilder` for creating configured interpreters.

use super::{Interpreter, InterpreterConfig};
use crate::frame::CallStack;
use crate::gc::GcState;
use crate::heap::Heap;
use crate::natives::NativeRegistry;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use brine_ir::Name;

/// Builder for [`Interpreter`].
///
/// Defaults: stdout output, every builtin native, [`InterpreterConfig::default`].
#[derive(Default)]
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    config: InterpreterConfig,
    natives: Option<NativeRegistry>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where `print`/`println` write and `input` reads.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn config(mut self, config: InterpreterConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the builtin native set.
    #[must_use]
    pub fn natives(mut self, natives: NativeRegistry) -> Self {
        self.natives = Some(natives);
        self
    }

    pub fn build(self) -> Interpreter {
        let gc = GcState::new(self.config.gc_initial_threshold, self.config.gc_enabled);
        Interpreter {
            heap: Heap::new(),
            frames: CallStack::new(),
            gc,
            config: self.config,
            natives: self.natives.unwrap_or_else(NativeRegistry::with_builtins),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            source_name: Name::new("<input>"),
        }
    }
}
