//! Rester - an embeddable language for describing HTTP interactions
//!
//! # Overview
//!
//! Rester has two dialects sharing one runtime:
//!
//! - The **Definition** dialect binds names to values or calls:
//!   `base is "http://api";` or `login is post "/login" with user "me";`
//! - The **Expression** dialect is a sequence of `;`-separated statements
//!   whose operators are plain bindings in the context. Precedence is looked
//!   up while evaluating, so user-defined closures become operators too.
//!
//! # Quick Start
//!
//! ```
//! use rester::{Engine, EngineOptions, Value};
//!
//! let mut engine = Engine::new(EngineOptions::default());
//! engine.define("token is base64encode \"user:pass\";").unwrap();
//!
//! let values = engine.run("double = x -> x * 2; double 21; token").unwrap();
//! assert_eq!(values[1], Value::Int(42));
//! assert_eq!(values[2], Value::from("dXNlcjpwYXNz"));
//! ```
//!
//! # Host Bindings
//!
//! Native functions are registered like any other value:
//!
//! ```
//! use rester::{Engine, EvalError, NativeFunction, Params, Value};
//!
//! fn shout(args: &[Value], _params: &Params) -> Result<Value, EvalError> {
//!     match args {
//!         [Value::Str(s)] => Ok(Value::from(s.to_uppercase())),
//!         _ => Err(EvalError::type_mismatch("shout expects one string")),
//!     }
//! }
//!
//! let mut engine = Engine::default();
//! engine.register("shout", Value::Function(NativeFunction::new("shout", shout)));
//! engine.define("loud is shout \"hi\";").unwrap();
//! assert_eq!(engine.lookup("loud").unwrap(), Value::from("HI"));
//! ```

mod error_renderer;

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};

// Re-export public API from rester_core
pub use rester_core::api::{Diagnostic, Engine, EngineOptions, Error, ExecutionMode, Severity};

pub use rester_core::ast::{self, Definition, Node, Quoted};
pub use rester_core::context::{Binding, Context, IdentifierProvider};
pub use rester_core::evaluator::{EvalError, Evaluator, EvaluatorOptions, Juxtaposition};
pub use rester_core::operators::{self, Operator, OperatorBinding, precedence};
pub use rester_core::parser::{
    ParseError, ParseErrorKind, parse_definitions, parse_definitions_with_max_depth,
    parse_statements, parse_statements_with_max_depth,
};
pub use rester_core::values::{self, NativeFn, NativeFunction, Params, Value};

pub use rester_core::{builtins, http};
