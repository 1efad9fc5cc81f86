// Source positions and nesting limits shared by both grammars.

use core::ops::Range;

use super::error::{ParseError, ParseErrorKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self(start..end)
    }
    pub fn at(pos: usize) -> Self {
        Self(pos..pos)
    }
    pub fn start(&self) -> usize {
        self.0.start
    }
    pub fn end(&self) -> usize {
        self.0.end
    }
    pub fn str_of<'a>(&self, source: &'a str) -> &'a str {
        &source[self.0.start..self.0.end]
    }
}

impl From<pest::Span<'_>> for Span {
    fn from(s: pest::Span<'_>) -> Self {
        Self(s.start()..s.end())
    }
}

/// Nesting allowed by [`parse_statements`](super::parse_statements) and
/// [`parse_definitions`](super::parse_definitions).
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// What deepens the parser's recursion besides brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Nesting {
    Brackets,
    /// Definition calls nest once per consecutive word: `f g h 1`.
    BracketsAndCalls,
}

/// Reject sources nested deeper than `max_depth` before handing them to pest,
/// whose recursive descent would otherwise exhaust the stack.
///
/// String literals and `#` comments are skipped; neither grammar allows a
/// quote inside a string.
pub(crate) fn check_nesting(
    source: &str,
    max_depth: usize,
    nesting: Nesting,
) -> Result<(), ParseError> {
    let too_deep = |depth: usize, span: Span| {
        Err(ParseError::new(
            ParseErrorKind::MaxDepthExceeded { depth, max_depth },
            source.to_string(),
            span,
        ))
    };

    let mut depth = 0usize;
    let mut calls = 0usize;
    let mut chars = source.char_indices().peekable();
    while let Some((pos, c)) = chars.next() {
        match c {
            '"' => {
                calls = 0;
                chars.by_ref().find(|&(_, c)| c == '"');
            }
            '#' => {
                chars.by_ref().find(|&(_, c)| c == '\n');
            }
            '(' | '[' | '{' => {
                calls = 0;
                depth += 1;
                if depth > max_depth {
                    return too_deep(depth, Span::new(pos, pos + 1));
                }
            }
            ')' | ']' | '}' => {
                calls = 0;
                depth = depth.saturating_sub(1);
            }
            c if c.is_whitespace() => {}
            c if nesting == Nesting::BracketsAndCalls && (c.is_ascii_alphabetic() || c == '_') => {
                let mut end = pos + 1;
                while let Some(&(i, c)) = chars.peek() {
                    if !(c.is_ascii_alphanumeric() || c == '_' || c == '-') {
                        break;
                    }
                    end = i + 1;
                    chars.next();
                }
                match &source[pos..end] {
                    "is" | "with" => calls = 0,
                    _ => {
                        calls += 1;
                        if depth + calls > max_depth {
                            return too_deep(depth + calls, Span::new(pos, end));
                        }
                    }
                }
            }
            _ => calls = 0,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exceeded(result: Result<(), ParseError>) -> Option<(usize, usize)> {
        match result.map_err(|e| e.kind) {
            Err(ParseErrorKind::MaxDepthExceeded { depth, max_depth }) => Some((depth, max_depth)),
            _ => None,
        }
    }

    #[test]
    fn test_brackets_within_limit() {
        assert!(check_nesting("([{}])", 3, Nesting::Brackets).is_ok());
        assert!(check_nesting("(()) (()) (())", 2, Nesting::Brackets).is_ok());
    }

    #[test]
    fn test_brackets_over_limit() {
        assert_eq!(exceeded(check_nesting("([{}])", 2, Nesting::Brackets)), Some((3, 2)));
    }

    #[test]
    fn test_strings_and_comments_skipped() {
        let source = "\"((((\" # [[[[\n(x)";
        assert!(check_nesting(source, 1, Nesting::Brackets).is_ok());
    }

    #[test]
    fn test_calls_nest_per_word() {
        let source = "r is f g h 1;";
        assert!(check_nesting(source, 3, Nesting::BracketsAndCalls).is_ok());
        assert_eq!(
            exceeded(check_nesting(source, 2, Nesting::BracketsAndCalls)),
            Some((3, 2))
        );
        // Words only chain calls in the definition dialect.
        assert!(check_nesting(source, 0, Nesting::Brackets).is_ok());
    }

    #[test]
    fn test_keywords_break_call_chains() {
        let source = "r is get \"/\" with retries 3;";
        assert!(check_nesting(source, 1, Nesting::BracketsAndCalls).is_ok());
    }
}
