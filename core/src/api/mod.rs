//! Public API for the rester language.
//!
//! # Example
//!
//! ```
//! use rester_core::api::{Engine, EngineOptions};
//! use rester_core::values::Value;
//!
//! let mut engine = Engine::new(EngineOptions::default());
//! engine.define(r#"req is get "http://x" with retries 3;"#).unwrap();
//!
//! let method = engine.evaluate("req . method").unwrap();
//! assert_eq!(method, Value::from("GET"));
//! ```

pub mod engine;
pub mod error;
pub mod options;

pub use engine::Engine;
pub use error::{Diagnostic, Error, Severity};
pub use options::{EngineOptions, ExecutionMode};
