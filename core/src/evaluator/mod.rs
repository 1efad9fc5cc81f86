//! Precedence-resolving evaluator over flat token sequences.
//!
//! Statements arrive from the parser as flat runs of tokens. Precedence is
//! resolved here, at evaluation time, by looking each identifier up in the
//! [`Context`](crate::context::Context):
//!
//! - the operator with the lowest precedence splits the run in two;
//! - among equal precedences the leftmost wins, so `1 - 2 - 3` is `1 - (2 - 3)`;
//! - special forms receive both sides unevaluated, simple operators receive values.
//!
//! ## Example
//!
//! ```ignore
//! use rester_core::{evaluator::Evaluator, parser::parse_statements};
//!
//! let statements = parse_statements("x = 5; x + 1")?;
//! let mut evaluator = Evaluator::default();
//! let result = evaluator.evaluate_statements(&mut ctx, &statements)?;
//! assert_eq!(result, Value::Int(6));
//! ```

mod error;
mod eval;
mod options;


pub use error::EvalError;
pub use eval::Evaluator;
pub use options::{EvaluatorOptions, Juxtaposition};
