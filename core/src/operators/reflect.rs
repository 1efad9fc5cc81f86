//! Reflection over identifiers: `identifiers` and `id`.

use hashbrown::HashSet;

use super::{Operator, expect_empty, quoted_statements};
use crate::ast::Node;
use crate::context::Context;
use crate::evaluator::{EvalError, Evaluator};
use crate::values::Value;

/// `identifiers ()` lists owned names; `identifiers { ... }` lists the names
/// the quoted statements introduce, evaluated in a copy of the context.
///
/// An empty group counts as no operand, since a lone `identifiers` token is
/// an ordinary lookup.
pub struct Identifiers;

impl Operator for Identifiers {
    fn name(&self) -> &str {
        "identifiers"
    }

    fn apply(
        &self,
        eval: &mut Evaluator,
        ctx: &mut Context,
        left: &[Node],
        right: &[Node],
    ) -> Result<Value, EvalError> {
        expect_empty("identifiers", "left", left)?;
        match right {
            [] => return Ok(names_of(ctx.names())),
            [Node::Group(items)] if items.is_empty() => return Ok(names_of(ctx.names())),
            _ => {}
        }

        let body = quoted_statements(eval, ctx, "identifiers", right)?;
        let before: HashSet<&str> = ctx.names().collect();
        let mut scope = ctx.copy();
        eval.evaluate_statements(&mut scope, body.statements())?;
        Ok(names_of(scope.names().filter(|name| !before.contains(name))))
    }
}

fn names_of<'a>(names: impl Iterator<Item = &'a str>) -> Value {
    Value::List(names.map(Value::from).collect())
}

/// `id "name"`: an identifier value built from a string.
pub struct Id;

impl Operator for Id {
    fn name(&self) -> &str {
        "id"
    }

    fn apply(
        &self,
        eval: &mut Evaluator,
        ctx: &mut Context,
        left: &[Node],
        right: &[Node],
    ) -> Result<Value, EvalError> {
        expect_empty("id", "left", left)?;
        match eval.evaluate(ctx, right)? {
            Value::Str(name) => Ok(Value::Ident(name)),
            Value::List(items) => match <[Value; 1]>::try_from(items) {
                Ok([Value::Str(name)]) => Ok(Value::Ident(name)),
                _ => Err(EvalError::type_mismatch("'id' expects a single string")),
            },
            other => Err(EvalError::type_mismatch(format!(
                "'id' expects a string, found {}",
                other.type_name()
            ))),
        }
    }
}
