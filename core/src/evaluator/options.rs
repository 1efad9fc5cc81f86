/// What a multi-token expression without any operator evaluates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Juxtaposition {
    /// Evaluate each token and return them as a list.
    #[default]
    Sequence,
    /// Fail with `OperatorNotFound`.
    Reject,
}

/// Configuration options for the evaluator.
///
/// # Example
///
/// ```
/// use rester_core::evaluator::{EvaluatorOptions, Juxtaposition};
///
/// let options = EvaluatorOptions {
///     max_depth: 64,
///     juxtaposition: Juxtaposition::Reject,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorOptions {
    /// Maximum evaluation stack depth (for recursion protection).
    ///
    /// Default: 256
    pub max_depth: usize,

    /// Policy for operator-free token sequences.
    ///
    /// Default: [`Juxtaposition::Sequence`]
    pub juxtaposition: Juxtaposition,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            max_depth: 256,
            juxtaposition: Juxtaposition::default(),
        }
    }
}
