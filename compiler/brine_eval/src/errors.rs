//! Runtime errors.
//!
//! Every runtime error is fatal. Operations build errors through the
//! factory functions below (`division_by_zero()`, `undefined_variable(..)`,
//! ...), which leave the location empty. The statement executor fills in
//! the source name, line and call trace of the innermost statement the
//! error passes through.

use crate::heap::HeapError;
use crate::value::Value;
use brine_ir::Name;
use std::fmt;
use thiserror::Error;

pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EvalErrorKind {
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
    #[error("cannot apply `{op}` to {left} and {right}")]
    InvalidOperands {
        op: &'static str,
        left: String,
        right: String,
    },
    #[error("cannot apply `{op}` to {operand}")]
    InvalidOperand { op: &'static str, operand: String },
    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: Name },
    #[error("{0}")]
    Heap(#[from] HeapError),
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: String, len: usize },
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("`{name}` expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("{found} is not callable")]
    NotCallable { found: String },
    #[error("cannot assign to {target}")]
    NotAssignable { target: String },
    #[error("cannot assign to constant `{name}`")]
    ConstantAssignment { name: Name },
    #[error("`{class}` has no member `{member}`")]
    NoSuchMember { class: String, member: Name },
    #[error("`break` outside of a loop")]
    BreakOutsideLoop,
    #[error("`continue` outside of a loop")]
    ContinueOutsideLoop,
    #[error("`return` outside of a function")]
    ReturnOutsideFunction,
    #[error("expected a heap reference for {what}, found {found}")]
    ReferenceRequired { what: String, found: String },
    #[error("function declared to return {expected} returned {found}")]
    ReturnContract { expected: String, found: String },
    #[error("maximum call depth of {depth} exceeded")]
    RecursionLimit { depth: usize },
    #[error("placeholder `@{placeholder}` has no argument ({given} given)")]
    MissingInterpolationArgument { placeholder: String, given: usize },
    #[error("cannot convert {text:?} to {target}")]
    InvalidConversion { text: String, target: &'static str },
    #[error("cannot {action} `{path}`: {message}")]
    Io {
        action: &'static str,
        path: String,
        message: String,
    },
    #[error("{0}")]
    Custom(String),
}

/// One active call at the moment an error was raised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    pub name: Name,
    pub line: u32,
}

/// Call stack snapshot, innermost call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "call trace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {} at line {}", frame.name, frame.line)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// For factory-created errors this equals `kind.to_string()`.
    pub message: String,
    pub source_name: Option<Name>,
    pub line: Option<u32>,
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    /// Error with a free-form message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom(message.into()))
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            source_name: None,
            line: None,
            backtrace: None,
        }
    }

    pub fn is_located(&self) -> bool {
        self.line.is_some()
    }

    #[must_use]
    pub fn with_location(mut self, source_name: Name, line: u32) -> Self {
        self.source_name = Some(source_name);
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

impl From<HeapError> for EvalError {
    fn from(err: HeapError) -> Self {
        EvalError::from_kind(EvalErrorKind::Heap(err))
    }
}

// Factory functions

pub fn type_mismatch(expected: &str, found: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        found: found.to_string(),
    })
}

pub fn invalid_operands(op: &'static str, left: &Value, right: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperands {
        op,
        left: left.describe(),
        right: right.describe(),
    })
}

pub fn invalid_operand(op: &'static str, operand: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperand {
        op,
        operand: operand.describe(),
    })
}

pub fn undefined_variable(name: &Name) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable { name: name.clone() })
}

pub fn index_out_of_bounds(index: &Value, len: usize) -> EvalError {
    let index = match index {
        Value::Num(n) => crate::value::format_num(*n),
        other => other.describe(),
    };
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

pub fn not_callable(found: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        found: found.describe(),
    })
}

pub fn not_assignable(target: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAssignable {
        target: target.describe(),
    })
}

pub fn assign_to_constant(name: &Name) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstantAssignment { name: name.clone() })
}

pub fn no_such_member(class: &str, member: &Name) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoSuchMember {
        class: class.to_string(),
        member: member.clone(),
    })
}

pub fn break_outside_loop() -> EvalError {
    EvalError::from_kind(EvalErrorKind::BreakOutsideLoop)
}

pub fn continue_outside_loop() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ContinueOutsideLoop)
}

pub fn return_outside_function() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReturnOutsideFunction)
}

pub fn reference_required(what: impl Into<String>, found: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReferenceRequired {
        what: what.into(),
        found: found.describe(),
    })
}

pub fn return_contract(expected: &str, found: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReturnContract {
        expected: expected.to_string(),
        found: found.to_string(),
    })
}

pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { depth })
}

pub fn missing_interpolation_argument(placeholder: &str, given: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingInterpolationArgument {
        placeholder: placeholder.to_string(),
        given,
    })
}

pub fn invalid_conversion(text: &str, target: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidConversion {
        text: text.to_string(),
        target,
    })
}

pub fn io_error(action: &'static str, path: &str, err: &std::io::Error) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Io {
        action,
        path: path.to_string(),
        message: err.to_string(),
    })
}
