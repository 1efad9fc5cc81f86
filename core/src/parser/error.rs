use crate::api::{Diagnostic, Severity};
use crate::parser::Span;

/// Parser error with the offending position.
///
/// Parsing is all-or-nothing: the first failure aborts and is reported here.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub source: String,
    pub span: Span,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// Unexpected token
    UnexpectedToken { expected: String, found: String },
    /// Number literal that does not fit its type
    InvalidNumber { text: String },
    /// Nesting depth exceeded
    MaxDepthExceeded { depth: usize, max_depth: usize },
    /// Other parse errors (catch-all for Pest errors we don't specifically handle)
    Other { message: String },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, source: String, span: Span) -> Self {
        Self { kind, source, span }
    }

    /// Byte offset where parsing failed.
    pub fn position(&self) -> usize {
        self.span.start()
    }

    /// 1-based line and column of [`ParseError::position`].
    pub fn line_col(&self) -> (usize, usize) {
        let upto = &self.source[..self.position().min(self.source.len())];
        let line = upto.matches('\n').count() + 1;
        let col = upto.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
        (line, col)
    }

    pub fn message(&self) -> String {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                format!("Expected {}, found {}", expected, found)
            }
            ParseErrorKind::InvalidNumber { text } => format!("Invalid number literal '{}'", text),
            ParseErrorKind::MaxDepthExceeded { max_depth, .. } => format!(
                "Expression nesting depth exceeds maximum of {} levels",
                max_depth
            ),
            ParseErrorKind::Other { message } => message.clone(),
        }
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (code, help) = match &self.kind {
            ParseErrorKind::UnexpectedToken { .. } => ("P001", vec![]),
            ParseErrorKind::InvalidNumber { .. } => (
                "P003",
                vec!["Integers must fit in a signed 64-bit value".to_string()],
            ),
            ParseErrorKind::MaxDepthExceeded { .. } => (
                "P004",
                vec!["Reduce nesting or simplify the expression".to_string()],
            ),
            ParseErrorKind::Other { .. } => ("P999", vec![]),
        };

        Diagnostic {
            severity: Severity::Error,
            message: self.message(),
            span: Some(self.span.clone()),
            help,
            code: Some(code.to_string()),
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (line, col) = self.line_col();
        write!(f, "error: {} at {}:{}", self.message(), line, col)
    }
}

impl std::error::Error for ParseError {}

/// Human-readable names for grammar rules, shared by both dialects.
pub(crate) trait DescribeRule: pest::RuleType {
    /// The concept a rule stands for, or `None` when it should not be reported.
    fn describe(self) -> Option<&'static str>;
}

/// Convert Pest error to human-readable ParseError
pub(crate) fn convert_pest_error<R: DescribeRule>(
    err: pest::error::Error<R>,
    source: &str,
) -> ParseError {
    use pest::error::ErrorVariant;

    let span = match err.location {
        pest::error::InputLocation::Pos(pos) => Span::at(pos),
        pest::error::InputLocation::Span((start, end)) => Span::new(start, end),
    };

    let kind = match err.variant {
        ErrorVariant::ParsingError { positives, .. } => ParseErrorKind::UnexpectedToken {
            expected: format_expected_rules(&positives),
            found: describe_found(source, span.start()),
        },
        ErrorVariant::CustomError { message } => ParseErrorKind::Other { message },
    };

    ParseError::new(kind, source.to_string(), span)
}

/// Format expected rules in a human-readable way
fn format_expected_rules<R: DescribeRule>(rules: &[R]) -> String {
    let mut concepts: Vec<&str> = Vec::new();
    for concept in rules.iter().filter_map(|rule| rule.describe()) {
        if !concepts.contains(&concept) {
            concepts.push(concept);
        }
    }

    match concepts.as_slice() {
        [] => "something else".to_string(),
        [single] => single.to_string(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

fn describe_found(source: &str, pos: usize) -> String {
    match source.get(pos..).and_then(|rest| rest.chars().next()) {
        Some(c) => format!("'{}'", c),
        None => "end of input".to_string(),
    }
}
