//! `params -> body` and the closures it produces.

use core::fmt;
use std::rc::Rc;

use tracing::debug;

use super::Operator;
use crate::ast::{DisplayTokens, Node, Quoted};
use crate::context::{Binding, Context};
use crate::evaluator::{EvalError, Evaluator};
use crate::values::Value;

/// `(x, y) -> body` or `x y -> body`.
///
/// Captures a copy of the defining context. A single quoted token on the
/// right is the body's statement list; otherwise the right tokens are the body.
pub struct FunctionDefinition;

impl Operator for FunctionDefinition {
    fn name(&self) -> &str {
        "->"
    }

    fn apply(
        &self,
        _eval: &mut Evaluator,
        ctx: &mut Context,
        left: &[Node],
        right: &[Node],
    ) -> Result<Value, EvalError> {
        let params = parameter_names(left)?;
        let body = match right {
            [Node::Block(quoted)] => quoted.clone(),
            tokens => Quoted::new(vec![tokens.to_vec()]),
        };
        debug!(params = ?params, "define closure");
        Ok(Value::Closure(Rc::new(Closure::new(
            params,
            ctx.copy(),
            body,
        ))))
    }
}

fn parameter_names(left: &[Node]) -> Result<Vec<String>, EvalError> {
    let not_a_parameter = |what: &dyn fmt::Display| {
        EvalError::type_mismatch(format!("expected parameter name, found '{}'", what))
    };
    match left {
        [Node::Group(items)] => items
            .iter()
            .map(|item| match item.as_slice() {
                [Node::Ident(name)] => Ok(name.clone()),
                tokens => Err(not_a_parameter(&DisplayTokens(tokens))),
            })
            .collect(),
        tokens => tokens
            .iter()
            .map(|token| match token {
                Node::Ident(name) => Ok(name.clone()),
                other => Err(not_a_parameter(other)),
            })
            .collect(),
    }
}

/// A function value: unbound parameters, captured bindings and a body.
///
/// Applying fewer arguments than parameters curries: the result is a new
/// closure with the supplied arguments bound into its captured context.
pub struct Closure {
    params: Vec<String>,
    captured: Context,
    body: Quoted,
}

impl Closure {
    /// Parameter names are removed from `captured`, so outer bindings with
    /// the same names never leak in as pre-bound arguments.
    pub fn new(params: Vec<String>, mut captured: Context, body: Quoted) -> Self {
        for param in &params {
            captured.delete(param);
        }
        Self {
            params,
            captured,
            body,
        }
    }

    /// Parameters still awaiting arguments.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn captured(&self) -> &Context {
        &self.captured
    }

    pub fn body(&self) -> &Quoted {
        &self.body
    }

    /// A fresh closure over the same parameters with its own captured copy.
    pub fn reinstantiate(&self) -> Closure {
        Closure {
            params: self.params.clone(),
            captured: self.captured.copy(),
            body: self.body.clone(),
        }
    }

    /// Bind `args` positionally, then run the body or return the remainder.
    pub fn call(&self, eval: &mut Evaluator, args: Vec<Value>) -> Result<Value, EvalError> {
        if args.len() > self.params.len() {
            return Err(EvalError::ArityMismatch {
                expected: self.params.len(),
                found: args.len(),
            });
        }

        let mut scope = self.captured.copy();
        let (bound, remaining) = self.params.split_at(args.len());
        for (name, value) in bound.iter().zip(args) {
            scope.set(name.clone(), Binding::Value(value));
        }

        if remaining.is_empty() {
            eval.evaluate_statements(&mut scope, self.body.statements())
        } else {
            Ok(Value::Closure(Rc::new(Closure {
                params: remaining.to_vec(),
                captured: scope,
                body: self.body.clone(),
            })))
        }
    }
}

impl Operator for Closure {
    fn name(&self) -> &str {
        "closure"
    }

    /// `f a b` or `f (a, b)`. Arguments are evaluated in the calling context;
    /// a bare `f` with nothing after it is handled as a plain value.
    fn apply(
        &self,
        eval: &mut Evaluator,
        ctx: &mut Context,
        left: &[Node],
        right: &[Node],
    ) -> Result<Value, EvalError> {
        if !left.is_empty() {
            return Err(EvalError::type_mismatch(format!(
                "closure applied with a left operand '{}'",
                DisplayTokens(left)
            )));
        }
        if right.is_empty() {
            return Ok(Value::Closure(Rc::new(self.reinstantiate())));
        }

        let args = match right {
            [Node::Group(items)] => items
                .iter()
                .map(|item| eval.evaluate(ctx, item))
                .collect::<Result<Vec<_>, _>>()?,
            tokens => tokens
                .iter()
                .map(|token| eval.evaluate_node(ctx, token))
                .collect::<Result<Vec<_>, _>>()?,
        };
        self.call(eval, args)
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) -> ", self.params.join(", "))?;
        match self.body.statements() {
            [single] => write!(f, "{}", DisplayTokens(single)),
            _ => write!(f, "{}", self.body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::{OperatorBinding, add, precedence};
    use crate::values::NativeFunction;

    fn ident(name: &str) -> Node {
        Node::Ident(name.to_string())
    }

    fn int(n: i64) -> Node {
        Node::Constant(Value::Int(n))
    }

    fn ctx() -> Context {
        let mut ctx = Context::empty();
        ctx.set("->", OperatorBinding::special(FunctionDefinition, precedence::FUNCTION));
        ctx.set(
            "+",
            OperatorBinding::simple(NativeFunction::new("+", add), precedence::ADDITIVE),
        );
        ctx
    }

    fn adder(eval: &mut Evaluator, ctx: &mut Context) -> Rc<Closure> {
        let tokens = [
            Node::Group(vec![vec![ident("x")], vec![ident("y")]]),
            ident("->"),
            ident("x"),
            ident("+"),
            ident("y"),
        ];
        match eval.evaluate(ctx, &tokens).unwrap() {
            Value::Closure(closure) => closure,
            other => panic!("expected closure, got {:?}", other),
        }
    }

    #[test]
    fn test_definition_params_and_body() {
        let mut ctx = ctx();
        let mut eval = Evaluator::default();
        let closure = adder(&mut eval, &mut ctx);
        assert_eq!(closure.params(), ["x".to_string(), "y".to_string()]);
        assert_eq!(closure.to_string(), "(x, y) -> x + y");
    }

    #[test]
    fn test_bare_identifier_params() {
        let mut ctx = ctx();
        let mut eval = Evaluator::default();
        let tokens = [ident("a"), ident("b"), ident("->"), ident("a")];
        let Value::Closure(closure) = eval.evaluate(&mut ctx, &tokens).unwrap() else {
            panic!("expected closure");
        };
        assert_eq!(closure.params(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_invalid_params() {
        let mut ctx = ctx();
        let mut eval = Evaluator::default();
        let tokens = [int(1), ident("->"), ident("a")];
        assert!(matches!(
            eval.evaluate(&mut ctx, &tokens),
            Err(EvalError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_currying() {
        let mut ctx = ctx();
        let mut eval = Evaluator::default();
        let closure = adder(&mut eval, &mut ctx);

        let Value::Closure(partial) = closure.call(&mut eval, vec![Value::Int(3)]).unwrap() else {
            panic!("expected partial application");
        };
        assert_eq!(partial.params(), ["y".to_string()]);
        assert_eq!(partial.call(&mut eval, vec![Value::Int(4)]), Ok(Value::Int(7)));
        // The original is untouched by currying.
        assert_eq!(
            closure.call(&mut eval, vec![Value::Int(1), Value::Int(1)]),
            Ok(Value::Int(2))
        );
    }

    #[test]
    fn test_too_many_arguments() {
        let mut ctx = ctx();
        let mut eval = Evaluator::default();
        let closure = adder(&mut eval, &mut ctx);
        let args = vec![Value::Int(1), Value::Int(2), Value::Int(3)];
        assert_eq!(
            closure.call(&mut eval, args),
            Err(EvalError::ArityMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_params_shadow_captured_bindings() {
        let mut ctx = ctx();
        ctx.set("x", Value::Int(100));
        let mut eval = Evaluator::default();
        let closure = adder(&mut eval, &mut ctx);
        assert!(!closure.captured().owns("x"));
        assert_eq!(closure.params().len(), 2);
    }

    #[test]
    fn test_reinstantiate_copies_captured() {
        let mut ctx = ctx();
        ctx.set("k", Value::Int(1));
        let mut eval = Evaluator::default();
        let closure = adder(&mut eval, &mut ctx);
        let fresh = closure.reinstantiate();
        assert_eq!(fresh.params(), closure.params());
        assert!(fresh.captured().owns("k"));
        assert!(fresh.body().ptr_eq(closure.body()));
    }
}
