//! Syntax tree shared by both dialects.
//!
//! Parsing never resolves precedence: an Expression-dialect statement is a
//! flat [`Tokens`] run, and only the evaluator decides where it splits.

use core::fmt;
use std::rc::Rc;

use crate::values::Value;

/// A flat, un-reduced sequence of value tokens.
pub type Tokens = Vec<Node>;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal value (string, number, boolean, null).
    Constant(Value),
    Ident(String),
    /// Definition-dialect call: `name arg...` or `name [value] with key value...`.
    Call {
        name: String,
        args: Vec<Node>,
        params: Vec<(String, Node)>,
    },
    /// Definition-dialect object literal `{ k: v, ... }`.
    Object(Vec<(String, Node)>),
    /// Array literal; each element is its own token sequence.
    List(Vec<Tokens>),
    /// Parenthesized comma list. Collapses to its only value when it has one element.
    Group(Vec<Tokens>),
    /// Quoted statements from `{ ... }` or `( ...; ... )`, kept unevaluated.
    Block(Quoted),
}

/// A quoted statement list, shared between the tree and the values produced from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Quoted(Rc<[Tokens]>);

impl Quoted {
    pub fn new(statements: Vec<Tokens>) -> Self {
        Self(Rc::from(statements))
    }

    pub fn statements(&self) -> &[Tokens] {
        &self.0
    }

    pub fn ptr_eq(&self, other: &Quoted) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Definition-dialect statement: `name is value;`.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: String,
    pub value: Node,
}

/// Write a token run space-separated, the way it reads in source.
pub struct DisplayTokens<'a>(pub &'a [Node]);

impl fmt::Display for DisplayTokens<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Tokens], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", DisplayTokens(item))?;
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Constant(value) => write!(f, "{}", value),
            Node::Ident(name) => write!(f, "{}", name),
            Node::Call { name, args, params } => {
                write!(f, "{}", name)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                for (key, value) in params {
                    write!(f, " with {} {}", key, value)?;
                }
                Ok(())
            }
            Node::Object(pairs) => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Node::List(items) => {
                write!(f, "[")?;
                write_items(f, items, ", ")?;
                write!(f, "]")
            }
            Node::Group(items) => {
                write!(f, "(")?;
                write_items(f, items, ", ")?;
                write!(f, ")")
            }
            Node::Block(quoted) => write!(f, "{}", quoted),
        }
    }
}

impl fmt::Display for Quoted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        write_items(f, self.statements(), "; ")?;
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_tokens() {
        let tokens = vec![
            Node::Ident("f".to_string()),
            Node::Group(vec![
                vec![Node::Ident("x".to_string())],
                vec![Node::Constant(Value::Int(2))],
            ]),
            Node::Block(Quoted::new(vec![vec![
                Node::Ident("a".to_string()),
                Node::Ident("=".to_string()),
                Node::Constant(Value::Str("s".to_string())),
            ]])),
        ];
        assert_eq!(
            DisplayTokens(&tokens).to_string(),
            r#"f (x, 2) { a = "s" }"#
        );
    }

    #[test]
    fn test_display_call() {
        let node = Node::Call {
            name: "get".to_string(),
            args: vec![Node::Constant(Value::Str("/x".to_string()))],
            params: vec![("retries".to_string(), Node::Constant(Value::Int(3)))],
        };
        assert_eq!(node.to_string(), r#"get "/x" with retries 3"#);
    }
}
