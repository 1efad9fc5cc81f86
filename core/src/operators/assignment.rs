use tracing::debug;

use super::Operator;
use crate::ast::Node;
use crate::context::{Binding, Context};
use crate::evaluator::{EvalError, Evaluator};
use crate::values::Value;

/// `name = expr`: bind the value of `expr` in the current context.
///
/// The target is a bare identifier, or any expression producing an
/// identifier value (`id "x" = 1`).
pub struct Assignment;

impl Operator for Assignment {
    fn name(&self) -> &str {
        "="
    }

    fn apply(
        &self,
        eval: &mut Evaluator,
        ctx: &mut Context,
        left: &[Node],
        right: &[Node],
    ) -> Result<Value, EvalError> {
        let name = match left {
            [Node::Ident(name)] => name.clone(),
            _ => match eval.evaluate(ctx, left)? {
                Value::Ident(name) => name,
                other => {
                    return Err(EvalError::type_mismatch(format!(
                        "cannot assign to {}",
                        other.type_name()
                    )));
                }
            },
        };

        let value = eval.evaluate(ctx, right)?;
        debug!(name = name.as_str(), value = %value, "assign");
        ctx.set(name, Binding::Value(value.clone()));
        Ok(value)
    }
}
