//! Core of the rester expression language: parsers for the Definition and
//! Expression dialects, the context, the precedence-resolving evaluator and
//! the builtin operators and functions.

pub mod api;
pub mod ast;
pub mod builtins;
pub mod context;
pub mod evaluator;
pub mod http;
pub mod operators;
pub mod parser;
pub mod values;

pub use api::{Engine, EngineOptions, Error};
pub use context::{Binding, Context, IdentifierProvider};
pub use values::Value;

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    ///
    /// # Example
    /// ```ignore
    /// #[test]
    /// fn test_currying() {
    ///     test_utils::init_test_logging();
    ///     // ... your test code
    /// }
    /// ```
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
