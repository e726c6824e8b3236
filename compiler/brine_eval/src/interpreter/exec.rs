//! Statement execution.
//!
//! Control flow travels as a [`Flow`] value in the `Ok` arm; errors in the
//! `Err` arm. A compound statement stops at the first statement that does
//! not finish normally and hands its flow outward.

use super::place::Step;
use super::Interpreter;
use crate::errors::{
    break_outside_loop, continue_outside_loop, return_outside_function, type_mismatch,
    EvalError,
};
use crate::frame::Variable;
use crate::types::{self, conform, default_value, inline_type};
use crate::value::{ClassValue, Value};
use brine_ir::{ClassDef, Declaration, Expr, Stmt, StmtKind, TypeName};
use brine_stack::ensure_sufficient_stack;
use std::rc::Rc;

/// How a statement finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Normal,
    Break,
    Continue,
    Return,
}

impl Interpreter {
    /// Execute one statement. An error leaving here carries the source
    /// location and call trace of the innermost statement it came from.
    pub(crate) fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow, EvalError> {
        self.frames.current_mut().line = stmt.pos.line;
        ensure_sufficient_stack(|| self.dispatch(stmt)).map_err(|err| {
            if err.is_located() {
                err
            } else {
                err.with_location(self.source_name.clone(), stmt.pos.line)
                    .with_backtrace(self.frames.backtrace())
            }
        })
    }

    fn dispatch(&mut self, stmt: &Stmt) -> Result<Flow, EvalError> {
        tracing::trace!(line = stmt.pos.line, "exec");
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.eval_expr(expr)?;
                Ok(Flow::Normal)
            }
            StmtKind::Decl(decl) => {
                self.exec_decl(decl)?;
                Ok(Flow::Normal)
            }
            StmtKind::Class(def) => {
                self.exec_class(def);
                Ok(Flow::Normal)
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_condition(cond)? {
                    self.exec_stmt(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmt(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }
            StmtKind::While { cond, body } => self.exec_loop(Some(cond), None, body),
            StmtKind::For {
                init,
                cond,
                step,
                body,
            } => {
                if let Some(init) = init {
                    self.exec_stmt(init)?;
                }
                self.exec_loop(cond.as_ref(), step.as_deref(), body)
            }
            StmtKind::Compound(stmts) => {
                for stmt in stmts {
                    let flow = self.exec_stmt(stmt)?;
                    if flow != Flow::Normal {
                        return Ok(flow);
                    }
                }
                Ok(Flow::Normal)
            }
            StmtKind::Break => {
                if self.frames.current().in_loop() {
                    Ok(Flow::Break)
                } else {
                    Err(break_outside_loop())
                }
            }
            StmtKind::Continue => {
                if self.frames.current().in_loop() {
                    Ok(Flow::Continue)
                } else {
                    Err(continue_outside_loop())
                }
            }
            StmtKind::Return(value) => self.exec_return(value.as_ref()),
            StmtKind::SetMember {
                target,
                member,
                op,
                value,
            } => {
                let mut place = self.place_of(target)?;
                place.push(Step::Member(member.clone()));
                self.assign_from(place, *op, value)?;
                Ok(Flow::Normal)
            }
            StmtKind::SetIndex {
                target,
                index,
                op,
                value,
            } => {
                let mut place = self.place_of(target)?;
                place.push(Step::Index(self.eval_expr(index)?));
                self.assign_from(place, *op, value)?;
                Ok(Flow::Normal)
            }
            StmtKind::Nop => Ok(Flow::Normal),
        }
    }

    /// `[const] [alloc] [ref] TYPE NAME [= EXPR];`
    fn exec_decl(&mut self, decl: &Declaration) -> Result<(), EvalError> {
        let what = || format!("`ref` declaration of `{}`", decl.name);
        let value = match &decl.init {
            Some(init) if decl.is_reference() => {
                let value = self.eval_hint(init, true)?;
                self.expect_reference(&decl.ty, value, what)?
            }
            Some(init) => {
                let value = self.eval_expr(init)?;
                conform(value, &decl.ty, &self.heap)?
            }
            None if decl.is_reference() => {
                self.expect_reference(&decl.ty, Value::Void, what)?
            }
            None => default_value(&decl.ty),
        };

        let value = if decl.is_allocated() {
            Value::Ref(self.heap.allocate(value))
        } else {
            value
        };
        let var = if decl.is_constant() {
            Variable::constant(decl.ty.clone(), value)
        } else {
            Variable::new(decl.ty.clone(), value)
        };
        self.frames.current_mut().declare(decl.name.clone(), var);

        if decl.is_allocated() {
            self.note_allocation();
        }
        Ok(())
    }

    fn exec_class(&mut self, def: &ClassDef) {
        let class = Value::Class(ClassValue {
            name: def.name.clone(),
            members: Rc::clone(&def.members),
        });
        self.frames.current_mut().declare(
            def.name.clone(),
            Variable::constant(TypeName::new(types::CLASS), class),
        );
    }

    /// Shared by `while` and `for`. A missing or empty condition is true.
    fn exec_loop(
        &mut self,
        cond: Option<&Expr>,
        step: Option<&Stmt>,
        body: &Stmt,
    ) -> Result<Flow, EvalError> {
        self.frames.current_mut().loop_depth += 1;
        let result = self.run_loop(cond.filter(|c| !c.is_empty()), step, body);
        self.frames.current_mut().loop_depth -= 1;
        result
    }

    fn run_loop(
        &mut self,
        cond: Option<&Expr>,
        step: Option<&Stmt>,
        body: &Stmt,
    ) -> Result<Flow, EvalError> {
        loop {
            if let Some(cond) = cond {
                if !self.eval_condition(cond)? {
                    break;
                }
            }
            match self.exec_stmt(body)? {
                Flow::Break => break,
                Flow::Return => return Ok(Flow::Return),
                Flow::Normal | Flow::Continue => {}
            }
            if let Some(step) = step {
                self.exec_stmt(step)?;
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_return(&mut self, value: Option<&Expr>) -> Result<Flow, EvalError> {
        let frame = self.frames.current();
        if !frame.inside_function {
            return Err(return_outside_function());
        }
        let by_ref = frame.returns_by_reference;
        let value = match value {
            Some(expr) if !expr.is_empty() => self.eval_hint(expr, by_ref)?,
            _ => Value::Void,
        };
        self.frames.current_mut().return_value = Some(value);
        Ok(Flow::Return)
    }

    fn eval_condition(&mut self, cond: &Expr) -> Result<bool, EvalError> {
        match self.eval_expr(cond)? {
            Value::Bool(b) => Ok(b),
            other => Err(type_mismatch(types::BOOL, inline_type(&other).as_str())),
        }
    }
}
