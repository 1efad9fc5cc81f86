//! Expression dialect: `f = (x, y) -> x + y; f 3 4;`
//!
//! Each statement becomes a flat [`Tokens`] run. Identifiers may be words or
//! runs of symbolic characters, so operators are ordinary identifiers here.

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use super::error::{DescribeRule, ParseError, ParseErrorKind, convert_pest_error};
use super::string_literal::unescape_string;
use super::syntax::{DEFAULT_MAX_DEPTH, Nesting, check_nesting};
use crate::ast::{Node, Quoted, Tokens};
use crate::values::Value;

#[derive(Parser)]
#[grammar = "parser/expression.pest"]
pub struct ExpressionParser;

impl DescribeRule for Rule {
    fn describe(self) -> Option<&'static str> {
        match self {
            Rule::string | Rule::float | Rule::integer | Rule::boolean | Rule::null => {
                Some("literal")
            }
            Rule::ident | Rule::word | Rule::symbol => Some("identifier"),
            Rule::array | Rule::paren | Rule::block => Some("expression"),
            Rule::semicolons => Some("';'"),
            Rule::commas => Some("','"),
            Rule::expression | Rule::statement => Some("expression"),
            Rule::EOI => Some("end of input"),
            _ => None,
        }
    }
}

/// Parse Expression-dialect source into its statements.
///
/// Empty statements (`;;`) are dropped. Brackets may nest up to
/// [`DEFAULT_MAX_DEPTH`] levels.
pub fn parse_statements(source: &str) -> Result<Vec<Tokens>, ParseError> {
    parse_statements_with_max_depth(source, DEFAULT_MAX_DEPTH)
}

/// [`parse_statements`] with an explicit nesting limit.
pub fn parse_statements_with_max_depth(
    source: &str,
    max_depth: usize,
) -> Result<Vec<Tokens>, ParseError> {
    check_nesting(source, max_depth, Nesting::Brackets)?;
    let mut pairs =
        ExpressionParser::parse(Rule::main, source).map_err(|e| convert_pest_error(e, source))?;
    let main = pairs
        .next()
        .ok_or_else(|| malformed(source, 0, "missing expected pair in rule"))?;
    let pos = main.as_span().start();
    let statements = main
        .into_inner()
        .find(|p| p.as_rule() == Rule::statements)
        .ok_or_else(|| malformed(source, pos, "missing statements"))?;
    build_statements(statements.into_inner(), source)
}

fn build_statements<'i>(
    pairs: impl Iterator<Item = Pair<'i, Rule>>,
    source: &str,
) -> Result<Vec<Tokens>, ParseError> {
    let mut statements = Vec::new();
    for statement in pairs.filter(|p| p.as_rule() == Rule::statement) {
        if let Some(expression) = statement.into_inner().next() {
            statements.push(build_expression(expression, source)?);
        }
    }
    Ok(statements)
}

fn build_expression(pair: Pair<Rule>, source: &str) -> Result<Tokens, ParseError> {
    pair.into_inner()
        .map(|value| build_value(value, source))
        .collect()
}

fn build_items(pair: Pair<Rule>, source: &str) -> Result<Vec<Tokens>, ParseError> {
    pair.into_inner()
        .map(|item| build_expression(item, source))
        .collect()
}

fn build_value(pair: Pair<Rule>, source: &str) -> Result<Node, ParseError> {
    match pair.as_rule() {
        Rule::string => {
            let s = pair.as_str();
            Ok(Node::Constant(Value::Str(unescape_string(&s[1..s.len() - 1]))))
        }

        Rule::integer => pair
            .as_str()
            .parse()
            .map(|n| Node::Constant(Value::Int(n)))
            .map_err(|_| invalid_number(&pair, source)),

        Rule::float => pair
            .as_str()
            .parse()
            .map(|n| Node::Constant(Value::Float(n)))
            .map_err(|_| invalid_number(&pair, source)),

        Rule::boolean => Ok(Node::Constant(Value::Bool(pair.as_str() == "true"))),

        Rule::null => Ok(Node::Constant(Value::Null)),

        Rule::array => Ok(Node::List(build_items(pair, source)?)),

        Rule::paren => build_paren(pair, source),

        Rule::block => {
            let pos = pair.as_span().start();
            let statements = pair
                .into_inner()
                .next()
                .ok_or_else(|| malformed(source, pos, "missing block statements"))?;
            Ok(Node::Block(Quoted::new(build_statements(
                statements.into_inner(),
                source,
            )?)))
        }

        Rule::ident => Ok(Node::Ident(pair.as_str().to_string())),

        rule => Err(malformed(
            source,
            pair.as_span().start(),
            &format!("Unhandled rule: {:?}", rule),
        )),
    }
}

/// `(a; b)` becomes a quoted block, anything else a group.
fn build_paren(pair: Pair<Rule>, source: &str) -> Result<Node, ParseError> {
    let pos = pair.as_span().start();
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .ok_or_else(|| malformed(source, pos, "missing parenthesized statement"))?;
    let tail = inner
        .next()
        .ok_or_else(|| malformed(source, pos, "missing parenthesized tail"))?;

    if tail.as_rule() == Rule::semicolons {
        let statements = core::iter::once(first).chain(tail.into_inner());
        return Ok(Node::Block(Quoted::new(build_statements(statements, source)?)));
    }

    let mut items = Vec::new();
    match first.into_inner().next() {
        Some(expression) => items.push(build_expression(expression, source)?),
        None if tail.as_span().start() < tail.as_span().end() => {
            return Err(unexpected(source, tail.as_span().start(), "expression", "','"));
        }
        None => {}
    }
    for item in tail.into_inner() {
        items.push(build_expression(item, source)?);
    }
    Ok(Node::Group(items))
}

fn unexpected(source: &str, pos: usize, expected: &str, found: &str) -> ParseError {
    ParseError::new(
        ParseErrorKind::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
        },
        source.to_string(),
        super::Span::at(pos),
    )
}

fn invalid_number(pair: &Pair<Rule>, source: &str) -> ParseError {
    ParseError::new(
        ParseErrorKind::InvalidNumber {
            text: pair.as_str().to_string(),
        },
        source.to_string(),
        pair.as_span().into(),
    )
}

fn malformed(source: &str, pos: usize, message: &str) -> ParseError {
    ParseError::new(
        ParseErrorKind::Other {
            message: message.to_string(),
        },
        source.to_string(),
        super::Span::at(pos),
    )
}
