//! Runtime evaluation errors.
//!
//! Evaluation is fail-fast: the first error aborts the current statement and
//! propagates to the caller unchanged.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Name bound neither in the context nor by any provider.
    #[error("Unbound identifier '{name}'")]
    UnboundIdentifier { name: String },

    #[error("Type mismatch: {message}")]
    TypeMismatch { message: String },

    /// A closure received more arguments than it has parameters left.
    #[error("Arity mismatch: expected at most {expected} argument(s), found {found}")]
    ArityMismatch { expected: usize, found: usize },

    /// No token of a multi-token expression resolves to an operator.
    #[error("No operator found in '{expression}'")]
    OperatorNotFound { expression: String },

    #[error("Evaluation stack overflow: depth {depth} exceeds maximum of {max_depth}")]
    RecursionLimitExceeded { depth: usize, max_depth: usize },

    #[error("Map has no member '{name}'")]
    MissingMember { name: String },

    #[error("'{name}' is not callable")]
    NotCallable { name: String },

    #[error("Division by zero")]
    DivisionByZero,

    /// A repetition would produce more than `max_len` bytes or items.
    #[error("Result too large: more than {max_len} elements")]
    SizeLimitExceeded { max_len: usize },

    /// Failure reported by a host function.
    #[error("{message}")]
    Native { message: String },
}

impl EvalError {
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        EvalError::TypeMismatch {
            message: message.into(),
        }
    }

    pub fn unbound(name: impl Into<String>) -> Self {
        EvalError::UnboundIdentifier { name: name.into() }
    }

    /// Resource errors are not the program's fault and are reported as such.
    pub fn is_resource_exceeded(&self) -> bool {
        matches!(
            self,
            EvalError::RecursionLimitExceeded { .. } | EvalError::SizeLimitExceeded { .. }
        )
    }

    /// Stable code for diagnostics, in the style of the parser's `P` codes.
    pub fn code(&self) -> &'static str {
        match self {
            EvalError::UnboundIdentifier { .. } => "E001",
            EvalError::TypeMismatch { .. } => "E002",
            EvalError::ArityMismatch { .. } => "E003",
            EvalError::OperatorNotFound { .. } => "E004",
            EvalError::RecursionLimitExceeded { .. } => "E005",
            EvalError::MissingMember { .. } => "E006",
            EvalError::NotCallable { .. } => "E007",
            EvalError::DivisionByZero => "E008",
            EvalError::Native { .. } => "E009",
            EvalError::SizeLimitExceeded { .. } => "E010",
        }
    }
}
