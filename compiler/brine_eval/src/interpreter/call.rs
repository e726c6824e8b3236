//! Invocation: user functions, natives, object construction and string
//! interpolation all go through the call operator.

use super::{Flow, Interpreter};
use crate::errors::{
    missing_interpolation_argument, not_callable, recursion_limit_exceeded, return_contract,
    wrong_arg_count, EvalResult,
};
use crate::frame::{Frame, Variable};
use crate::natives::{NativeContext, NativeFunction};
use crate::types::{self, conform, is_compatible, realized_type};
use crate::value::{ClassValue, FunctionValue, ObjectValue, Value};
use brine_ir::{Expr, FunctionDef, Name, Param, TypeName};
use smallvec::SmallVec;
use std::rc::Rc;

/// Argument groups that hold an expression. `f()` carries one empty group.
fn arguments(args: &[Expr]) -> SmallVec<[&Expr; 4]> {
    args.iter().filter(|arg| !arg.is_empty()).collect()
}

impl Interpreter {
    /// The call operator. A bare name that no variable shadows may refer
    /// to a native; otherwise the callee is resolved and dispatched on.
    pub(super) fn call(&mut self, callee: Value, args: &[Expr]) -> EvalResult {
        let invoked_as = match &callee {
            Value::Ident(name) => {
                if self.lookup(name).is_none() {
                    if let Some(native) = self.natives.get(name) {
                        return self.call_native(native, args);
                    }
                }
                Some(name.clone())
            }
            _ => None,
        };
        match self.resolve_owned(callee)? {
            Value::Function(func) => self.call_function(&func, invoked_as, args),
            Value::Class(class) => self.construct(&class, args),
            Value::Str(template) => self.interpolate(&template, args),
            other => Err(not_callable(&other)),
        }
    }

    fn call_native(&mut self, native: NativeFunction, args: &[Expr]) -> EvalResult {
        let args = arguments(args);
        native.check_arity(args.len())?;
        let mut values: SmallVec<[Value; 4]> = SmallVec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_hint(arg, native.takes_references)?);
        }
        tracing::trace!(native = native.name, "native call");
        (native.execute)(&values, &mut NativeContext::new(self))
    }

    /// Invoke a user function with a fresh frame.
    pub(crate) fn call_function(
        &mut self,
        func: &FunctionValue,
        invoked_as: Option<Name>,
        args: &[Expr],
    ) -> EvalResult {
        let def = Rc::clone(&func.def);
        let name = invoked_as
            .clone()
            .or_else(|| func.bound_name.clone())
            .unwrap_or_else(|| Name::new("<anonymous>"));

        let args = arguments(args);
        if args.len() != def.params.len() {
            return Err(wrong_arg_count(&name, def.params.len(), args.len()));
        }
        let max_depth = self.config.max_call_depth;
        if self.frames.depth() >= max_depth {
            return Err(recursion_limit_exceeded(max_depth));
        }

        let mut frame = Frame::function(name.clone(), def.returns_ref);
        frame.line = def.pos.line;
        for (param, arg) in def.params.iter().zip(args) {
            let value = self.eval_hint(arg, param.is_ref)?;
            let value = self.check_slot(param, value, "parameter")?;
            frame.declare(param.name.clone(), Variable::new(param.ty.clone(), value));
        }
        if let Some(invoked) = &invoked_as {
            frame.declare(
                invoked.clone(),
                Variable::constant(TypeName::new(types::FUNC), Value::Function(func.clone())),
            );
        }
        if let Some(receiver) = func.this_ref {
            frame.declare(
                Name::new("this"),
                Variable::new(TypeName::new(types::OBJ), Value::Ref(receiver)),
            );
        }
        if def.captures {
            let caller = self.frames.current();
            for (var_name, var) in caller.variables() {
                let excluded = var_name.as_str() == "this"
                    || invoked_as.as_ref() == Some(var_name)
                    || def.params.iter().any(|p| p.name == *var_name);
                if !excluded {
                    frame.declare(var_name.clone(), var.clone());
                }
            }
        }

        let span = tracing::debug_span!("call", function = %name, depth = self.frames.depth() + 1);
        let _entered = span.enter();
        self.frames.push(frame);
        let result = self.exec_stmt(&def.body);
        let frame = self.frames.pop();
        let returned = match result? {
            Flow::Return => frame.and_then(|f| f.return_value).unwrap_or(Value::Void),
            Flow::Normal | Flow::Break | Flow::Continue => Value::Void,
        };
        self.check_return(&def, &name, returned)
    }

    /// Hold a function to its declared return type.
    fn check_return(&self, def: &FunctionDef, name: &Name, value: Value) -> EvalResult {
        if def.returns_ref {
            return self.expect_reference(&def.return_type, value, || {
                format!("the return value of `{name}`")
            });
        }
        let actual = realized_type(&value, &self.heap);
        if !is_compatible(&def.return_type, &actual) {
            return Err(return_contract(def.return_type.as_str(), actual.as_str()));
        }
        conform(value, &def.return_type, &self.heap)
    }

    /// Check a value passed into a parameter or member slot.
    fn check_slot(&self, param: &Param, value: Value, what: &str) -> EvalResult {
        if param.is_ref {
            self.expect_reference(&param.ty, value, || format!("{what} `{}`", param.name))
        } else {
            conform(value, &param.ty, &self.heap)
        }
    }

    /// `ClassName(args)`: one argument per member, in declaration order.
    fn construct(&mut self, class: &ClassValue, args: &[Expr]) -> EvalResult {
        let args = arguments(args);
        if args.len() != class.members.len() {
            return Err(wrong_arg_count(&class.name, class.members.len(), args.len()));
        }
        let mut members = Vec::with_capacity(args.len());
        for (param, arg) in class.members.iter().zip(args) {
            let value = self.eval_hint(arg, param.is_ref)?;
            members.push(self.check_slot(param, value, "member")?);
        }
        Ok(Value::Object(ObjectValue {
            class_name: class.name.clone(),
            layout: Rc::clone(&class.members),
            members,
        }))
    }

    /// `"text @0 @1"(a, b)`: each `@N` becomes the display form of
    /// argument `N`. An `@` not followed by a digit is kept as is.
    fn interpolate(&mut self, template: &str, args: &[Expr]) -> EvalResult {
        let mut shown = Vec::new();
        for arg in arguments(args) {
            let value = self.eval_expr(arg)?;
            shown.push(self.display(&value));
        }

        let mut out = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '@' {
                out.push(c);
                continue;
            }
            let mut digits = String::new();
            while let Some(d) = chars.next_if(char::is_ascii_digit) {
                digits.push(d);
            }
            if digits.is_empty() {
                out.push('@');
                continue;
            }
            let text = digits
                .parse::<usize>()
                .ok()
                .and_then(|i| shown.get(i))
                .ok_or_else(|| missing_interpolation_argument(&digits, shown.len()))?;
            out.push_str(text);
        }
        Ok(Value::str(&out))
    }
}
