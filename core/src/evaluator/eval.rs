//! Core evaluation logic.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::ast::{DisplayTokens, Node, Tokens};
use crate::context::{Binding, Context};
use crate::evaluator::{EvalError, EvaluatorOptions, Juxtaposition};
use crate::operators::{IMPLICIT_PRECEDENCE, Operator, OperatorBinding};
use crate::values::{Map, NativeFunction, Params, Value};

/// Evaluator for parsed statements.
///
/// Holds no bindings of its own; every call takes the [`Context`] to read
/// and mutate, so one evaluator can serve nested scopes.
#[derive(Debug, Default)]
pub struct Evaluator {
    options: EvaluatorOptions,
    depth: usize,
}

impl Evaluator {
    pub fn new(options: EvaluatorOptions) -> Self {
        Self { options, depth: 0 }
    }

    pub fn options(&self) -> &EvaluatorOptions {
        &self.options
    }

    /// Evaluate statements in order and return the last value (`null` if none).
    pub fn evaluate_statements(
        &mut self,
        ctx: &mut Context,
        statements: &[Tokens],
    ) -> Result<Value, EvalError> {
        let mut last = Value::Null;
        for statement in statements {
            last = self.evaluate(ctx, statement)?;
        }
        Ok(last)
    }

    /// Evaluate a flat token sequence.
    ///
    /// Empty sequences are `null` and a single token is evaluated on its
    /// own. Longer sequences split at their lowest-precedence operator.
    pub fn evaluate(&mut self, ctx: &mut Context, tokens: &[Node]) -> Result<Value, EvalError> {
        match tokens {
            [] => Ok(Value::Null),
            [node] => self.evaluate_node(ctx, node),
            _ => self.descend(|this| this.reduce(ctx, tokens)),
        }
    }

    /// Evaluate a single node.
    pub fn evaluate_node(&mut self, ctx: &mut Context, node: &Node) -> Result<Value, EvalError> {
        self.descend(|this| this.evaluate_node_inner(ctx, node))
    }

    /// The value a binding stands for. Definition nodes are evaluated on read.
    pub fn binding_value(
        &mut self,
        ctx: &mut Context,
        binding: Binding,
    ) -> Result<Value, EvalError> {
        match binding {
            Binding::Value(value) => Ok(value),
            Binding::Node(node) => self.evaluate_node(ctx, &node),
            Binding::Operator(op) => Ok(Value::Operator(op)),
        }
    }

    /// Apply an operator to the tokens on either side of it.
    pub fn apply_operator(
        &mut self,
        ctx: &mut Context,
        binding: &OperatorBinding,
        left: &[Node],
        right: &[Node],
    ) -> Result<Value, EvalError> {
        match binding {
            OperatorBinding::SpecialForm { operator, .. } => {
                operator.apply(self, ctx, left, right)
            }
            OperatorBinding::Simple { func, .. } => {
                let lhs = if left.is_empty() {
                    None
                } else {
                    Some(self.evaluate(ctx, left)?)
                };
                let rhs = if right.is_empty() {
                    None
                } else {
                    Some(self.evaluate(ctx, right)?)
                };
                apply_simple(func, lhs, rhs)
            }
        }
    }

    fn descend<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, EvalError>,
    ) -> Result<T, EvalError> {
        // Check depth before recursing
        if self.depth >= self.options.max_depth {
            return Err(EvalError::RecursionLimitExceeded {
                depth: self.depth,
                max_depth: self.options.max_depth,
            });
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;

        result
    }

    fn reduce(&mut self, ctx: &mut Context, tokens: &[Node]) -> Result<Value, EvalError> {
        let Some((index, binding)) = find_split(ctx, tokens) else {
            return match self.options.juxtaposition {
                Juxtaposition::Sequence => tokens
                    .iter()
                    .map(|token| self.evaluate_node(ctx, token))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::List),
                Juxtaposition::Reject => Err(EvalError::OperatorNotFound {
                    expression: DisplayTokens(tokens).to_string(),
                }),
            };
        };

        debug!(
            operator = binding.name(),
            precedence = binding.precedence(),
            index,
            "split"
        );
        let (left, rest) = tokens.split_at(index);
        self.apply_operator(ctx, &binding, left, &rest[1..])
    }

    fn evaluate_node_inner(&mut self, ctx: &mut Context, node: &Node) -> Result<Value, EvalError> {
        match node {
            Node::Constant(value) => Ok(value.clone()),

            Node::Ident(name) => {
                let binding = ctx.get(name).ok_or_else(|| EvalError::unbound(name))?;
                self.binding_value(ctx, binding)
            }

            Node::Call { name, args, params } => self.call(ctx, name, args, params),

            Node::Object(pairs) => {
                let mut map = Map::with_capacity(pairs.len());
                for (key, value) in pairs {
                    map.insert(key.clone(), self.evaluate_node(ctx, value)?);
                }
                Ok(Value::Map(map))
            }

            Node::List(items) => items
                .iter()
                .map(|item| self.evaluate(ctx, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),

            Node::Group(items) => match items.as_slice() {
                [single] => self.evaluate(ctx, single),
                _ => items
                    .iter()
                    .map(|item| self.evaluate(ctx, item))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::List),
            },

            Node::Block(quoted) => Ok(Value::Quoted(quoted.clone())),
        }
    }

    /// Definition-dialect call `name args... with key value...`.
    fn call(
        &mut self,
        ctx: &mut Context,
        name: &str,
        args: &[Node],
        params: &[(String, Node)],
    ) -> Result<Value, EvalError> {
        let binding = ctx.get(name).ok_or_else(|| EvalError::unbound(name))?;
        let func = match self.binding_value(ctx, binding)? {
            Value::Operator(OperatorBinding::SpecialForm { operator, .. }) => {
                return operator.apply(self, ctx, &[], args);
            }
            Value::Closure(closure) => {
                if !params.is_empty() {
                    return Err(EvalError::type_mismatch(format!(
                        "closure '{}' takes no named parameters",
                        name
                    )));
                }
                return closure.apply(self, ctx, &[], args);
            }
            Value::Operator(OperatorBinding::Simple { func, .. }) | Value::Function(func) => func,
            _ => {
                return Err(EvalError::NotCallable {
                    name: name.to_string(),
                });
            }
        };

        let args = args
            .iter()
            .map(|arg| self.evaluate_node(ctx, arg))
            .collect::<Result<Vec<_>, _>>()?;
        let mut evaluated = Params::with_capacity(params.len());
        for (key, value) in params {
            evaluated.insert(key.clone(), self.evaluate_node(ctx, value)?);
        }
        trace!(function = func.name(), args = args.len(), "call");
        func.call(&args, &evaluated)
    }
}

/// Leftmost token with the strictly lowest operator precedence.
fn find_split(ctx: &Context, tokens: &[Node]) -> Option<(usize, OperatorBinding)> {
    let mut best: Option<(usize, OperatorBinding)> = None;
    for (index, token) in tokens.iter().enumerate() {
        let Node::Ident(name) = token else {
            continue;
        };
        let Some(binding) = ctx.get(name).and_then(as_operator) else {
            continue;
        };
        trace!(name = name.as_str(), precedence = binding.precedence(), "operator candidate");
        if best
            .as_ref()
            .is_none_or(|(_, current)| binding.precedence() < current.precedence())
        {
            best = Some((index, binding));
        }
    }
    best
}

/// Operator view of a binding. Closures act as special forms at the implicit precedence.
fn as_operator(binding: Binding) -> Option<OperatorBinding> {
    match binding {
        Binding::Operator(op) | Binding::Value(Value::Operator(op)) => Some(op),
        Binding::Value(Value::Closure(closure)) => Some(OperatorBinding::SpecialForm {
            operator: closure as Rc<dyn Operator>,
            precedence: IMPLICIT_PRECEDENCE,
        }),
        _ => None,
    }
}

/// Call a simple operator with evaluated operands.
///
/// A list on exactly one side is broadcast element-wise against the other
/// side. A missing side makes the call unary: the present operand is
/// splatted, a list contributing each element as an argument.
fn apply_simple(
    func: &NativeFunction,
    left: Option<Value>,
    right: Option<Value>,
) -> Result<Value, EvalError> {
    let params = Params::new();
    match (left, right) {
        (Some(Value::List(items)), Some(rhs)) if !rhs.is_list() => items
            .into_iter()
            .map(|item| func.call(&[item, rhs.clone()], &params))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        (Some(lhs), Some(Value::List(items))) if !lhs.is_list() => items
            .into_iter()
            .map(|item| func.call(&[lhs.clone(), item], &params))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        (Some(lhs), Some(rhs)) => func.call(&[lhs, rhs], &params),
        (Some(operand), None) | (None, Some(operand)) => match operand {
            Value::List(items) => func.call(&items, &params),
            operand => func.call(&[operand], &params),
        },
        (None, None) => func.call(&[], &params),
    }
}
