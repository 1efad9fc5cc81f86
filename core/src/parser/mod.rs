mod definition;
pub mod error;
mod expression;
mod string_literal;
mod syntax;

// Re-export the parsers and rule enums for external use
pub use definition::{
    DefinitionParser, Rule as DefinitionRule, parse_definitions, parse_definitions_with_max_depth,
};
pub use expression::{
    ExpressionParser, Rule as ExpressionRule, parse_statements, parse_statements_with_max_depth,
};

pub use error::{ParseError, ParseErrorKind};
pub use string_literal::{escape_string, unescape_string};
pub use syntax::{DEFAULT_MAX_DEPTH, Span};
