use super::Operator;
use crate::ast::{DisplayTokens, Node};
use crate::context::Context;
use crate::evaluator::{EvalError, Evaluator};
use crate::values::Value;

/// `expr . name`: member of a map, `null` on `null`.
///
/// The member name is taken literally and never evaluated. Since
/// equal-precedence operators split leftmost, `a.b.c` hands `b.c` to the
/// first `.` and fails; write `(a.b).c` instead.
pub struct Access;

impl Operator for Access {
    fn name(&self) -> &str {
        "."
    }

    fn apply(
        &self,
        eval: &mut Evaluator,
        ctx: &mut Context,
        left: &[Node],
        right: &[Node],
    ) -> Result<Value, EvalError> {
        let [Node::Ident(member)] = right else {
            return Err(EvalError::type_mismatch(format!(
                "'.' expects a member name, found '{}'",
                DisplayTokens(right)
            )));
        };

        match eval.evaluate(ctx, left)? {
            Value::Map(map) => map.get(member).cloned().ok_or_else(|| EvalError::MissingMember {
                name: member.clone(),
            }),
            Value::Null => Ok(Value::Null),
            other => Err(EvalError::type_mismatch(format!(
                "cannot access '{}' on {}",
                member,
                other.type_name()
            ))),
        }
    }
}
