//! Operators: the special forms and the standard simple-operator table.
//!
//! A *simple* operator is a [`NativeFunction`] applied to already-evaluated
//! operands. A *special form* implements [`Operator`] and receives the raw
//! tokens on each side, deciding for itself what to evaluate and where.

mod access;
mod arithmetic;
mod assignment;
mod function;
mod reflect;
mod scoped;
mod standard;

use core::fmt;
use std::rc::Rc;

use crate::ast::Node;
use crate::context::Context;
use crate::evaluator::{EvalError, Evaluator};
use crate::values::{NativeFunction, Value};

pub use access::Access;
pub use arithmetic::{MAX_REPEAT_LEN, add, divide, multiply, random, subtract, sum};
pub use assignment::Assignment;
pub use function::{Closure, FunctionDefinition};
pub use reflect::{Id, Identifiers};
pub use scoped::{ScopedEval, ScopedExtract};
pub use standard::{StandardOperators, precedence};

pub(crate) use scoped::quoted_statements;

/// Precedence of operators bound without one (closures, `exists`).
pub const IMPLICIT_PRECEDENCE: i32 = 100;

/// A special form.
///
/// `left` and `right` are the unevaluated tokens before and after the
/// operator's occurrence; either may be empty.
pub trait Operator {
    fn name(&self) -> &str;

    fn apply(
        &self,
        eval: &mut Evaluator,
        ctx: &mut Context,
        left: &[Node],
        right: &[Node],
    ) -> Result<Value, EvalError>;
}

/// An operator together with its precedence. Lower binds first.
#[derive(Clone)]
pub enum OperatorBinding {
    Simple {
        func: NativeFunction,
        precedence: i32,
    },
    SpecialForm {
        operator: Rc<dyn Operator>,
        precedence: i32,
    },
}

impl OperatorBinding {
    pub fn simple(func: NativeFunction, precedence: i32) -> Self {
        OperatorBinding::Simple { func, precedence }
    }

    pub fn special(operator: impl Operator + 'static, precedence: i32) -> Self {
        OperatorBinding::SpecialForm {
            operator: Rc::new(operator),
            precedence,
        }
    }

    pub fn precedence(&self) -> i32 {
        match self {
            OperatorBinding::Simple { precedence, .. }
            | OperatorBinding::SpecialForm { precedence, .. } => *precedence,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            OperatorBinding::Simple { func, .. } => func.name(),
            OperatorBinding::SpecialForm { operator, .. } => operator.name(),
        }
    }
}

// Special forms compare by identity.
impl PartialEq for OperatorBinding {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                OperatorBinding::Simple { func: a, precedence: pa },
                OperatorBinding::Simple { func: b, precedence: pb },
            ) => a == b && pa == pb,
            (
                OperatorBinding::SpecialForm { operator: a, precedence: pa },
                OperatorBinding::SpecialForm { operator: b, precedence: pb },
            ) => std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)) && pa == pb,
            _ => false,
        }
    }
}

impl fmt::Debug for OperatorBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            OperatorBinding::Simple { .. } => "simple",
            OperatorBinding::SpecialForm { .. } => "special",
        };
        write!(f, "<{} operator {} @{}>", kind, self.name(), self.precedence())
    }
}

/// Reject a non-empty operand for operators that take only one side.
pub(crate) fn expect_empty(operator: &str, side: &str, tokens: &[Node]) -> Result<(), EvalError> {
    if tokens.is_empty() {
        Ok(())
    } else {
        Err(EvalError::type_mismatch(format!(
            "'{}' takes no {} operand",
            operator, side
        )))
    }
}
