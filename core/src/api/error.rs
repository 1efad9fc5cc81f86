//! Public error types for the rester API.
//!
//! Internal errors are converted to these at the API boundary. Every error
//! can also be turned into a [`Diagnostic`] for rendering.

use core::fmt;

use thiserror::Error as ThisError;

use crate::evaluator::EvalError;
use crate::parser::{ParseError, Span};

/// Public error type for all engine operations.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    /// Malformed source text.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Failure while evaluating a statement.
    #[error("Runtime error: {0}")]
    Eval(#[from] EvalError),
}

impl Error {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Error::Parse(err) => err.to_diagnostic(),
            Error::Eval(err) => eval_diagnostic(err),
        }
    }

    /// Source text the error refers to, when it has one.
    pub fn source_text(&self) -> Option<&str> {
        match self {
            Error::Parse(err) => Some(&err.source),
            Error::Eval(_) => None,
        }
    }
}

fn eval_diagnostic(err: &EvalError) -> Diagnostic {
    let help = match err {
        EvalError::UnboundIdentifier { name } => {
            vec![format!("bind it first, e.g. `{} = ...`", name)]
        }
        EvalError::OperatorNotFound { .. } => vec![
            "juxtaposed values only form a list when juxtaposition is allowed".to_string(),
        ],
        EvalError::RecursionLimitExceeded { .. } => {
            vec!["raise the limit with a larger max_depth".to_string()]
        }
        EvalError::MissingMember { .. } => {
            vec!["chained access needs parentheses: `(a.b).c`".to_string()]
        }
        EvalError::SizeLimitExceeded { .. } => {
            vec!["repeat a smaller string or list, or repeat fewer times".to_string()]
        }
        _ => Vec::new(),
    };

    Diagnostic {
        severity: Severity::Error,
        message: err.to_string(),
        span: None,
        help,
        code: Some(err.code().to_string()),
    }
}

/// A diagnostic message with an optional source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level (error, warning, info).
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue. Evaluation errors carry none.
    pub span: Option<Span>,

    /// Hints suggesting how to fix the issue.
    pub help: Vec<String>,

    /// Optional error code (e.g., "P001") for documentation lookup.
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_statements;

    #[test]
    fn test_parse_error_converts() {
        let err: Error = parse_statements("(").unwrap_err().into();
        let diagnostic = err.to_diagnostic();
        assert_eq!(diagnostic.code.as_deref(), Some("P001"));
        assert!(diagnostic.span.is_some());
        assert_eq!(err.source_text(), Some("("));
    }

    #[test]
    fn test_eval_error_converts() {
        let err: Error = EvalError::unbound("x").into();
        assert_eq!(err.to_string(), "Runtime error: Unbound identifier 'x'");
        let diagnostic = err.to_diagnostic();
        assert_eq!(diagnostic.code.as_deref(), Some("E001"));
        assert_eq!(diagnostic.span, None);
        assert_eq!(diagnostic.help.len(), 1);
    }
}
