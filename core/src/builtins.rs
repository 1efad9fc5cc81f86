//! Host functions: `base64encode`, the request builders and `exists`.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::ast::Node;
use crate::context::{Binding, Context, IdentifierProvider};
use crate::evaluator::{EvalError, Evaluator};
use crate::operators::{IMPLICIT_PRECEDENCE, Operator, OperatorBinding};
use crate::values::{Map, NativeFunction, Params, Value};

/// Resolves builtin names on demand. Not enumerable.
pub struct BuiltinFunctionProvider {
    exists: OperatorBinding,
}

impl BuiltinFunctionProvider {
    pub fn new() -> Self {
        Self {
            exists: OperatorBinding::special(Exists, IMPLICIT_PRECEDENCE),
        }
    }
}

impl Default for BuiltinFunctionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierProvider for BuiltinFunctionProvider {
    fn provide(&self, name: &str) -> Option<Binding> {
        let func = match name {
            "base64encode" => NativeFunction::new("base64encode", base64encode),
            "get" => NativeFunction::new("get", get),
            "post" => NativeFunction::new("post", post),
            "put" => NativeFunction::new("put", put),
            "delete" => NativeFunction::new("delete", delete),
            "exists" => return Some(Binding::Operator(self.exists.clone())),
            _ => return None,
        };
        Some(Binding::Value(Value::Function(func)))
    }
}

/// Standard-alphabet, padded base64 of the string's UTF-8 bytes.
fn base64encode(args: &[Value], _params: &Params) -> Result<Value, EvalError> {
    match args {
        [Value::Str(s)] => Ok(Value::Str(STANDARD.encode(s.as_bytes()))),
        [other] => Err(EvalError::type_mismatch(format!(
            "base64encode expects a string, found {}",
            other.type_name()
        ))),
        _ => Err(EvalError::ArityMismatch {
            expected: 1,
            found: args.len(),
        }),
    }
}

/// `{method, args, params}` descriptor consumed by the request layer.
fn request(method: &str, args: &[Value], params: &Params) -> Result<Value, EvalError> {
    let mut descriptor = Map::with_capacity(3);
    descriptor.insert("method".to_string(), Value::from(method));
    descriptor.insert("args".to_string(), Value::List(args.to_vec()));
    descriptor.insert("params".to_string(), Value::Map(params.clone()));
    Ok(Value::Map(descriptor))
}

fn get(args: &[Value], params: &Params) -> Result<Value, EvalError> {
    request("GET", args, params)
}

fn post(args: &[Value], params: &Params) -> Result<Value, EvalError> {
    request("POST", args, params)
}

fn put(args: &[Value], params: &Params) -> Result<Value, EvalError> {
    request("PUT", args, params)
}

fn delete(args: &[Value], params: &Params) -> Result<Value, EvalError> {
    request("DELETE", args, params)
}

/// `exists name`: whether `name` is bound in the context itself.
///
/// Provider bindings do not count. The operand is taken literally when it
/// is a bare identifier, otherwise it must evaluate to an identifier or string.
pub struct Exists;

impl Operator for Exists {
    fn name(&self) -> &str {
        "exists"
    }

    fn apply(
        &self,
        eval: &mut Evaluator,
        ctx: &mut Context,
        left: &[Node],
        right: &[Node],
    ) -> Result<Value, EvalError> {
        crate::operators::expect_empty("exists", "left", left)?;
        let name = match right {
            [Node::Ident(name)] => name.clone(),
            tokens => match eval.evaluate(ctx, tokens)? {
                Value::Ident(name) | Value::Str(name) => name,
                other => {
                    return Err(EvalError::type_mismatch(format!(
                        "'exists' expects an identifier, found {}",
                        other.type_name()
                    )));
                }
            },
        };
        Ok(Value::Bool(ctx.owns(&name)))
    }
}
