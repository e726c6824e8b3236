//! Call frames and variables.
//!
//! One frame per function activation, plus the top-level frame. The
//! interpreter keeps them on an explicit stack (innermost last) which is
//! also the garbage collector's root set. Blocks do not open scopes; a
//! name declared anywhere in a function body lives until the call returns.

use crate::errors::{BacktraceFrame, EvalBacktrace};
use crate::value::Value;
use brine_ir::{Name, TypeName};
use rustc_hash::FxHashMap;

/// A named binding.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    pub declared_type: TypeName,
    pub value: Value,
    pub is_constant: bool,
}

impl Variable {
    pub fn new(declared_type: TypeName, value: Value) -> Self {
        Variable {
            declared_type,
            value,
            is_constant: false,
        }
    }

    pub fn constant(declared_type: TypeName, value: Value) -> Self {
        Variable {
            declared_type,
            value,
            is_constant: true,
        }
    }
}

#[derive(Debug)]
pub struct Frame {
    vars: FxHashMap<Name, Variable>,
    /// Shown in call traces.
    pub name: Name,
    pub inside_function: bool,
    pub returns_by_reference: bool,
    pub loop_depth: u32,
    /// Line of the statement currently executing in this frame.
    pub line: u32,
    pub return_value: Option<Value>,
}

impl Frame {
    pub fn top_level() -> Self {
        Self::with_name(Name::new("<main>"), false, false)
    }

    pub fn function(name: Name, returns_by_reference: bool) -> Self {
        Self::with_name(name, true, returns_by_reference)
    }

    fn with_name(name: Name, inside_function: bool, returns_by_reference: bool) -> Self {
        Frame {
            vars: FxHashMap::default(),
            name,
            inside_function,
            returns_by_reference,
            loop_depth: 0,
            line: 0,
            return_value: None,
        }
    }

    /// Bind `name`, replacing any earlier binding in this frame.
    pub fn declare(&mut self, name: Name, var: Variable) {
        self.vars.insert(name, var);
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.vars.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.vars.get_mut(name)
    }

    pub fn variables(&self) -> impl Iterator<Item = (&Name, &Variable)> {
        self.vars.iter()
    }

    pub fn in_loop(&self) -> bool {
        self.loop_depth > 0
    }
}

/// The top-level frame plus every active call, innermost last.
#[derive(Debug)]
pub struct CallStack {
    main: Frame,
    calls: Vec<Frame>,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            main: Frame::top_level(),
            calls: Vec::new(),
        }
    }

    pub fn current(&self) -> &Frame {
        self.calls.last().unwrap_or(&self.main)
    }

    pub fn current_mut(&mut self) -> &mut Frame {
        match self.calls.last_mut() {
            Some(frame) => frame,
            None => &mut self.main,
        }
    }

    pub fn main(&self) -> &Frame {
        &self.main
    }

    pub fn main_mut(&mut self) -> &mut Frame {
        &mut self.main
    }

    pub fn push(&mut self, frame: Frame) {
        self.calls.push(frame);
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.calls.pop()
    }

    /// Number of active function calls.
    pub fn depth(&self) -> usize {
        self.calls.len()
    }

    /// Every frame, outermost first.
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        std::iter::once(&self.main).chain(&self.calls)
    }

    /// Values the collector treats as live.
    pub fn roots(&self) -> impl Iterator<Item = &Value> {
        self.iter().flat_map(|frame| {
            frame
                .variables()
                .map(|(_, var)| &var.value)
                .chain(frame.return_value.as_ref())
        })
    }

    /// Snapshot for error reports, innermost call first.
    pub fn backtrace(&self) -> EvalBacktrace {
        let frames = self
            .iter()
            .map(|frame| BacktraceFrame {
                name: frame.name.clone(),
                line: frame.line,
            })
            .collect::<Vec<_>>();
        EvalBacktrace::new(frames.into_iter().rev().collect())
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}
