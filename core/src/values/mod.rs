//! Runtime values produced by evaluation.

pub mod function;
pub mod value;

pub use function::{NativeFn, NativeFunction, Params};
pub use value::{Map, Value};
