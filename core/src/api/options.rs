//! Configuration options for the rester engine.

use crate::evaluator::EvaluatorOptions;

/// How a multi-statement run reacts to a failing statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// The first failure aborts the run.
    #[default]
    FailFast,
    /// Each statement's outcome is reported separately; later statements
    /// still run.
    Isolated,
}

/// Configuration options for the engine.
///
/// # Example
///
/// ```
/// use rester_core::api::{EngineOptions, ExecutionMode};
/// use rester_core::evaluator::EvaluatorOptions;
///
/// let options = EngineOptions {
///     evaluator: EvaluatorOptions {
///         max_depth: 64,
///         ..EvaluatorOptions::default()
///     },
///     mode: ExecutionMode::Isolated,
/// };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Limits and policies for each evaluation.
    pub evaluator: EvaluatorOptions,

    /// Statement failure policy used by [`Engine::execute`](super::Engine::execute).
    ///
    /// Default: [`ExecutionMode::FailFast`]
    pub mode: ExecutionMode,
}
