//! The rester engine: a context plus the two dialect entry points.

use std::rc::Rc;

use tracing::{info, warn};

use super::{EngineOptions, Error, ExecutionMode};
use crate::builtins::BuiltinFunctionProvider;
use crate::context::{Binding, Context, IdentifierProvider};
use crate::evaluator::{EvalError, Evaluator};
use crate::operators::StandardOperators;
use crate::parser::{self, ParseError};
use crate::values::Value;

/// Owns a [`Context`] and evaluates source text against it.
///
/// Bindings persist across calls, so definitions loaded with
/// [`Engine::define`] are visible to later [`Engine::run`] calls.
///
/// # Example
///
/// ```
/// use rester_core::api::{Engine, EngineOptions};
/// use rester_core::values::Value;
///
/// let mut engine = Engine::new(EngineOptions::default());
/// engine.define("timeout is 30;").unwrap();
/// let result = engine.evaluate("f = (x, y) -> x + y; f timeout 4").unwrap();
/// assert_eq!(result, Value::Int(34));
/// ```
pub struct Engine {
    options: EngineOptions,
    context: Context,
}

impl Engine {
    /// Create an engine whose context resolves the standard operators and
    /// the builtin functions.
    pub fn new(options: EngineOptions) -> Self {
        Self::with_context(options, Self::default_context())
    }

    /// Create an engine over an existing context.
    pub fn with_context(options: EngineOptions, context: Context) -> Self {
        Self { options, context }
    }

    /// A fresh context with the standard provider chain.
    pub fn default_context() -> Context {
        let providers: Vec<Rc<dyn IdentifierProvider>> = vec![
            Rc::new(StandardOperators::new()),
            Rc::new(BuiltinFunctionProvider::new()),
        ];
        Context::new(providers)
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn into_context(self) -> Context {
        self.context
    }

    /// Bind a host value or operator.
    pub fn register(&mut self, name: impl Into<String>, binding: impl Into<Binding>) {
        self.context.set(name, binding);
    }

    /// Load Definition-dialect source. Each definition is bound unevaluated
    /// and reduced whenever its name is read.
    ///
    /// Returns the defined names in source order.
    pub fn define(&mut self, source: &str) -> Result<Vec<String>, Error> {
        let definitions = parser::parse_definitions(source)?;
        info!(count = definitions.len(), "define");
        let mut names = Vec::with_capacity(definitions.len());
        for definition in definitions {
            self.context
                .set(definition.name.clone(), Binding::from(definition.value));
            names.push(definition.name);
        }
        Ok(names)
    }

    /// Run Expression-dialect source, one value per statement.
    ///
    /// Stops at the first failing statement; bindings made by earlier
    /// statements are kept.
    pub fn run(&mut self, source: &str) -> Result<Vec<Value>, Error> {
        let statements = parser::parse_statements(source)?;
        info!(statements = statements.len(), "run");
        let mut evaluator = self.evaluator();
        let mut values = Vec::with_capacity(statements.len());
        for statement in &statements {
            values.push(evaluator.evaluate(&mut self.context, statement)?);
        }
        Ok(values)
    }

    /// Run every statement regardless of earlier failures.
    pub fn run_isolated(&mut self, source: &str) -> Result<Vec<Result<Value, EvalError>>, ParseError> {
        let statements = parser::parse_statements(source)?;
        info!(statements = statements.len(), "run isolated");
        let mut evaluator = self.evaluator();
        let outcomes = statements
            .iter()
            .enumerate()
            .map(|(index, statement)| {
                let outcome = evaluator.evaluate(&mut self.context, statement);
                if let Err(err) = &outcome {
                    warn!(statement = index, error = %err, "statement failed");
                }
                outcome
            })
            .collect();
        Ok(outcomes)
    }

    /// Run according to [`EngineOptions::mode`].
    ///
    /// Under [`ExecutionMode::FailFast`] the outcomes end at the first failure.
    pub fn execute(&mut self, source: &str) -> Result<Vec<Result<Value, EvalError>>, ParseError> {
        match self.options.mode {
            ExecutionMode::Isolated => self.run_isolated(source),
            ExecutionMode::FailFast => {
                let statements = parser::parse_statements(source)?;
                let mut evaluator = self.evaluator();
                let mut outcomes = Vec::with_capacity(statements.len());
                for statement in &statements {
                    let outcome = evaluator.evaluate(&mut self.context, statement);
                    let failed = outcome.is_err();
                    outcomes.push(outcome);
                    if failed {
                        break;
                    }
                }
                Ok(outcomes)
            }
        }
    }

    /// Value of the last statement, `null` when there is none.
    pub fn evaluate(&mut self, source: &str) -> Result<Value, Error> {
        Ok(self.run(source)?.pop().unwrap_or(Value::Null))
    }

    /// Evaluate the binding of `name`, reducing definitions.
    pub fn lookup(&mut self, name: &str) -> Result<Value, Error> {
        let binding = self
            .context
            .get(name)
            .ok_or_else(|| EvalError::unbound(name))?;
        let mut evaluator = self.evaluator();
        Ok(evaluator.binding_value(&mut self.context, binding)?)
    }

    fn evaluator(&self) -> Evaluator {
        Evaluator::new(self.options.evaluator)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}
