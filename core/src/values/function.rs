//! Host functions callable from both dialects.

use core::fmt;

use super::value::{Map, Value};
use crate::evaluator::EvalError;

/// Named arguments passed to a native function (`with key value` in definitions).
pub type Params = Map;

/// Type alias for native function pointers.
///
/// Positional arguments arrive already evaluated. Simple operators are native
/// functions too: binary use passes two arguments, unary use splats the
/// operand (a list operand contributes each of its elements).
///
/// # Example
///
/// ```ignore
/// fn upper(args: &[Value], _params: &Params) -> Result<Value, EvalError> {
///     match args {
///         [Value::Str(s)] => Ok(Value::Str(s.to_uppercase())),
///         _ => Err(EvalError::type_mismatch("upper expects one string")),
///     }
/// }
/// ```
pub type NativeFn = fn(args: &[Value], params: &Params) -> Result<Value, EvalError>;

/// A native function together with the name it is reported under.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    name: &'static str,
    func: NativeFn,
}

impl NativeFunction {
    pub const fn new(name: &'static str, func: NativeFn) -> Self {
        Self { name, func }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, args: &[Value], params: &Params) -> Result<Value, EvalError> {
        (self.func)(args, params)
    }
}

// Function pointers have no reliable identity, so the name stands in for it.
impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

impl fmt::Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}
