//! Request layer interface.
//!
//! Evaluation never performs I/O. The request builders produce descriptor
//! maps; this module turns them into [`Operation`]s that run against an
//! [`HttpClient`] supplied by the host.

mod decorators;
mod operation;

use core::fmt;
use core::str::FromStr;

use indexmap::IndexMap;
use thiserror::Error;

use crate::values::{Map, Value};

pub use decorators::{WithBaseUrl, WithHeaders};
pub use operation::{
    BearerAuthOperation, ConstantOperation, Operation, RequestOperation, SequenceOperation,
};

pub type Headers = IndexMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl FromStr for Method {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            _ => Err(HttpError::InvalidMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HttpError {
    #[error("Unknown HTTP method '{0}'")]
    InvalidMethod(String),

    #[error("Invalid request descriptor: {0}")]
    InvalidDescriptor(String),

    /// Failure reported by the client implementation.
    #[error("Request failed: {0}")]
    Transport(String),
}

/// Transport capability provided by the host.
pub trait HttpClient {
    fn send(
        &self,
        url: &str,
        method: Method,
        body: &Value,
        headers: Option<&Headers>,
    ) -> Result<Value, HttpError>;
}

/// Typed view of the `{method, args, params}` map built by `get`/`post`/`put`/`delete`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub args: Vec<Value>,
    pub params: Map,
}

impl TryFrom<&Value> for RequestDescriptor {
    type Error = HttpError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let map = value.as_map().ok_or_else(|| {
            HttpError::InvalidDescriptor(format!("expected a map, found {}", value.type_name()))
        })?;
        let field = |name: &str| {
            map.get(name)
                .ok_or_else(|| HttpError::InvalidDescriptor(format!("missing '{}'", name)))
        };

        let method = field("method")?
            .as_str()
            .ok_or_else(|| HttpError::InvalidDescriptor("'method' must be a string".to_string()))?
            .parse::<Method>()?;
        let args = field("args")?
            .as_list()
            .ok_or_else(|| HttpError::InvalidDescriptor("'args' must be a list".to_string()))?
            .to_vec();
        let params = field("params")?
            .as_map()
            .ok_or_else(|| HttpError::InvalidDescriptor("'params' must be a map".to_string()))?
            .clone();

        Ok(RequestDescriptor {
            method,
            args,
            params,
        })
    }
}


#[cfg(test)]
mod tests {
    use indexmap::indexmap;

    use super::*;

    #[test]
    fn test_method_round_trip() {
        assert_eq!("post".parse::<Method>(), Ok(Method::Post));
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(
            "patch".parse::<Method>(),
            Err(HttpError::InvalidMethod("patch".to_string()))
        );
    }

    #[test]
    fn test_descriptor_from_value() {
        let value = Value::Map(indexmap! {
            "method".to_string() => Value::from("GET"),
            "args".to_string() => Value::List(vec![Value::from("/users")]),
            "params".to_string() => Value::Map(Map::new()),
        });
        let descriptor = RequestDescriptor::try_from(&value).unwrap();
        assert_eq!(descriptor.method, Method::Get);
        assert_eq!(descriptor.args, vec![Value::from("/users")]);
    }

    #[test]
    fn test_descriptor_errors() {
        assert!(matches!(
            RequestDescriptor::try_from(&Value::Int(1)),
            Err(HttpError::InvalidDescriptor(_))
        ));
        let value = Value::Map(indexmap! { "method".to_string() => Value::from("GET") });
        assert_eq!(
            RequestDescriptor::try_from(&value),
            Err(HttpError::InvalidDescriptor("missing 'args'".to_string()))
        );
    }
}
