//! Definition dialect: `timeout is 30;` and `req is get "http://x" with retries 3;`

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use super::error::{DescribeRule, ParseError, ParseErrorKind, convert_pest_error};
use super::string_literal::unescape_string;
use super::syntax::{DEFAULT_MAX_DEPTH, Nesting, check_nesting};
use crate::ast::{Definition, Node};
use crate::values::Value;

#[derive(Parser)]
#[grammar = "parser/definition.pest"]
pub struct DefinitionParser;

impl DescribeRule for Rule {
    fn describe(self) -> Option<&'static str> {
        match self {
            Rule::string | Rule::number | Rule::boolean | Rule::null => Some("literal"),
            Rule::object | Rule::array | Rule::call => Some("value"),
            Rule::ident => Some("identifier"),
            Rule::is => Some("'is'"),
            Rule::with | Rule::param | Rule::params => Some("'with'"),
            Rule::definition => Some("definition"),
            Rule::EOI => Some("end of input"),
            _ => None,
        }
    }
}

/// Parse Definition-dialect source. An empty source yields no definitions.
pub fn parse_definitions(source: &str) -> Result<Vec<Definition>, ParseError> {
    parse_definitions_with_max_depth(source, DEFAULT_MAX_DEPTH)
}

/// [`parse_definitions`] with an explicit limit on brackets plus chained calls.
pub fn parse_definitions_with_max_depth(
    source: &str,
    max_depth: usize,
) -> Result<Vec<Definition>, ParseError> {
    check_nesting(source, max_depth, Nesting::BracketsAndCalls)?;
    let mut pairs =
        DefinitionParser::parse(Rule::main, source).map_err(|e| convert_pest_error(e, source))?;
    let Some(main) = pairs.next() else {
        return Ok(Vec::new());
    };
    main.into_inner()
        .filter(|p| p.as_rule() == Rule::definition)
        .map(|p| build_definition(p, source))
        .collect()
}

fn build_definition(pair: Pair<Rule>, source: &str) -> Result<Definition, ParseError> {
    let pos = pair.as_span().start();
    let mut inner = pair.into_inner().filter(|p| p.as_rule() != Rule::is);
    let name = inner
        .next()
        .ok_or_else(|| malformed(source, pos, "missing definition name"))?
        .as_str()
        .to_string();
    let value = build_value(
        inner
            .next()
            .ok_or_else(|| malformed(source, pos, "missing definition value"))?,
        source,
    )?;
    Ok(Definition { name, value })
}

fn build_value(pair: Pair<Rule>, source: &str) -> Result<Node, ParseError> {
    match pair.as_rule() {
        Rule::string => {
            let s = pair.as_str();
            Ok(Node::Constant(Value::Str(unescape_string(&s[1..s.len() - 1]))))
        }

        Rule::number => {
            let text = pair.as_str();
            let value = if text.contains('.') {
                text.parse().map(Value::Float).ok()
            } else {
                text.parse().map(Value::Int).ok()
            };
            value.map(Node::Constant).ok_or_else(|| {
                ParseError::new(
                    ParseErrorKind::InvalidNumber {
                        text: text.to_string(),
                    },
                    source.to_string(),
                    pair.as_span().into(),
                )
            })
        }

        Rule::boolean => Ok(Node::Constant(Value::Bool(pair.as_str() == "true"))),

        Rule::null => Ok(Node::Constant(Value::Null)),

        Rule::object => {
            let pairs = pair
                .into_inner()
                .map(|entry| build_named(entry, source))
                .collect::<Result<_, _>>()?;
            Ok(Node::Object(pairs))
        }

        Rule::array => {
            let items = pair
                .into_inner()
                .map(|item| build_value(item, source).map(|node| vec![node]))
                .collect::<Result<_, _>>()?;
            Ok(Node::List(items))
        }

        Rule::call => build_call(pair, source),

        Rule::ident => Ok(Node::Ident(pair.as_str().to_string())),

        rule => Err(malformed(
            source,
            pair.as_span().start(),
            &format!("Unhandled rule: {:?}", rule),
        )),
    }
}

/// `name (value | with-params | positional args)`; positional and named
/// arguments never mix except for the single leading value.
fn build_call(pair: Pair<Rule>, source: &str) -> Result<Node, ParseError> {
    let pos = pair.as_span().start();
    let mut inner = pair.into_inner();
    let name = inner
        .next()
        .ok_or_else(|| malformed(source, pos, "missing callee"))?
        .as_str()
        .to_string();

    let mut args = Vec::new();
    let mut params = Vec::new();
    for part in inner {
        match part.as_rule() {
            Rule::params => {
                params = part
                    .into_inner()
                    .map(|param| build_named(param, source))
                    .collect::<Result<_, _>>()?;
            }
            _ => args.push(build_value(part, source)?),
        }
    }

    Ok(Node::Call { name, args, params })
}

/// Object `pair` (`key: value`) or call `param` (`with key value`).
fn build_named(pair: Pair<Rule>, source: &str) -> Result<(String, Node), ParseError> {
    let pos = pair.as_span().start();
    let mut inner = pair.into_inner().filter(|p| p.as_rule() != Rule::with);
    let name = inner
        .next()
        .ok_or_else(|| malformed(source, pos, "missing name"))?
        .as_str()
        .to_string();
    let value = build_value(
        inner
            .next()
            .ok_or_else(|| malformed(source, pos, "missing value"))?,
        source,
    )?;
    Ok((name, value))
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
