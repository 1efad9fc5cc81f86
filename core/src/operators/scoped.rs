//! `$ { ... }` and `@ { ... }`: evaluation inside a copy of the context.

use super::{Operator, expect_empty};
use crate::ast::{Node, Quoted};
use crate::context::{Binding, Context};
use crate::evaluator::{EvalError, Evaluator};
use crate::values::{Map, Value};

/// Statements of a quoted right operand.
///
/// Accepts a `{ ... }` or `( ...; ... )` token, a parenthesized group (each
/// item one statement), or a single token evaluating to a quoted value.
pub(crate) fn quoted_statements(
    eval: &mut Evaluator,
    ctx: &mut Context,
    operator: &str,
    right: &[Node],
) -> Result<Quoted, EvalError> {
    match right {
        [Node::Block(quoted)] => Ok(quoted.clone()),
        [Node::Group(items)] => Ok(Quoted::new(items.clone())),
        [token] => match eval.evaluate_node(ctx, token)? {
            Value::Quoted(quoted) => Ok(quoted),
            other => Err(EvalError::type_mismatch(format!(
                "'{}' expects a quoted expression, found {}",
                operator,
                other.type_name()
            ))),
        },
        _ => Err(EvalError::type_mismatch(format!(
            "'{}' expects exactly one quoted expression",
            operator
        ))),
    }
}

/// `$ { statements }`: the last statement's value. Assignments stay local.
pub struct ScopedEval;

impl Operator for ScopedEval {
    fn name(&self) -> &str {
        "$"
    }

    fn apply(
        &self,
        eval: &mut Evaluator,
        ctx: &mut Context,
        left: &[Node],
        right: &[Node],
    ) -> Result<Value, EvalError> {
        expect_empty("$", "left", left)?;
        let body = quoted_statements(eval, ctx, "$", right)?;
        let mut scope = ctx.copy();
        eval.evaluate_statements(&mut scope, body.statements())
    }
}

/// `@ { statements }` and `target @ { statements }`.
///
/// Without a target, returns every owned binding of the scope afterwards.
/// A bare identifier target names the binding to return. Any other target
/// is evaluated in the scope first: a string or identifier value names the
/// binding, a quoted value is evaluated after the body and its result returned.
pub struct ScopedExtract;

impl Operator for ScopedExtract {
    fn name(&self) -> &str {
        "@"
    }

    fn apply(
        &self,
        eval: &mut Evaluator,
        ctx: &mut Context,
        left: &[Node],
        right: &[Node],
    ) -> Result<Value, EvalError> {
        let body = quoted_statements(eval, ctx, "@", right)?;
        let mut scope = ctx.copy();

        match left {
            [] => {
                eval.evaluate_statements(&mut scope, body.statements())?;
                owned_bindings(eval, &mut scope)
            }
            [Node::Ident(name)] => {
                eval.evaluate_statements(&mut scope, body.statements())?;
                lookup(eval, &mut scope, name)
            }
            _ => {
                let target = eval.evaluate(&mut scope, left)?;
                eval.evaluate_statements(&mut scope, body.statements())?;
                match target {
                    Value::Str(name) | Value::Ident(name) => lookup(eval, &mut scope, &name),
                    Value::Quoted(quoted) => eval.evaluate_statements(&mut scope, quoted.statements()),
                    other => Err(EvalError::type_mismatch(format!(
                        "'@' cannot extract by {}",
                        other.type_name()
                    ))),
                }
            }
        }
    }
}

fn owned_bindings(eval: &mut Evaluator, scope: &mut Context) -> Result<Value, EvalError> {
    let owned: Vec<(String, Binding)> = scope
        .bindings()
        .map(|(name, binding)| (name.to_string(), binding.clone()))
        .collect();
    let mut map = Map::with_capacity(owned.len());
    for (name, binding) in owned {
        let value = eval.binding_value(scope, binding)?;
        map.insert(name, value);
    }
    Ok(Value::Map(map))
}

fn lookup(eval: &mut Evaluator, scope: &mut Context, name: &str) -> Result<Value, EvalError> {
    let binding = scope.get(name).ok_or_else(|| EvalError::unbound(name))?;
    eval.binding_value(scope, binding)
}
