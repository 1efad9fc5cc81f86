//! Composable units of work run against an [`HttpClient`].

use tracing::debug;

use super::{Headers, HttpClient, HttpError, Method, RequestDescriptor, WithBaseUrl, WithHeaders};
use crate::values::{Map, Value};

pub trait Operation {
    fn perform(&mut self, client: &dyn HttpClient) -> Result<(), HttpError>;

    /// Result of the last [`Operation::perform`], `null` before it runs.
    fn result(&self) -> Value;
}

/// A single request.
pub struct RequestOperation {
    url: String,
    method: Method,
    data: Value,
    result: Value,
}

impl RequestOperation {
    pub fn new(url: impl Into<String>, method: Method, data: Value) -> Self {
        Self {
            url: url.into(),
            method,
            data,
            result: Value::Null,
        }
    }

    /// Build from a `get`/`post`/... descriptor.
    ///
    /// The URL is the first positional argument. The body is the `data`
    /// parameter, else the second positional argument, else an empty map.
    pub fn from_descriptor(descriptor: &RequestDescriptor) -> Result<Self, HttpError> {
        let url = descriptor
            .args
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| {
                HttpError::InvalidDescriptor("first argument must be a URL string".to_string())
            })?;
        let data = descriptor
            .params
            .get("data")
            .or_else(|| descriptor.args.get(1))
            .cloned()
            .unwrap_or_else(|| Value::Map(Map::new()));
        Ok(Self::new(url, descriptor.method, data))
    }
}

impl Operation for RequestOperation {
    fn perform(&mut self, client: &dyn HttpClient) -> Result<(), HttpError> {
        debug!(method = %self.method, url = self.url.as_str(), "send");
        self.result = client.send(&self.url, self.method, &self.data, None)?;
        Ok(())
    }

    fn result(&self) -> Value {
        self.result.clone()
    }
}

/// A fixed value; performing it sends nothing.
pub struct ConstantOperation {
    value: Value,
}

impl ConstantOperation {
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl Operation for ConstantOperation {
    fn perform(&mut self, _client: &dyn HttpClient) -> Result<(), HttpError> {
        Ok(())
    }

    fn result(&self) -> Value {
        self.value.clone()
    }
}

/// Runs operations in order under a shared base URL. The result lists each
/// operation's result.
pub struct SequenceOperation {
    operations: Vec<Box<dyn Operation>>,
    base_url: String,
}

impl SequenceOperation {
    pub fn new(operations: Vec<Box<dyn Operation>>, base_url: impl Into<String>) -> Self {
        Self {
            operations,
            base_url: base_url.into(),
        }
    }
}

impl Operation for SequenceOperation {
    fn perform(&mut self, client: &dyn HttpClient) -> Result<(), HttpError> {
        let client = WithBaseUrl::new(client, self.base_url.as_str());
        for operation in &mut self.operations {
            operation.perform(&client)?;
        }
        Ok(())
    }

    fn result(&self) -> Value {
        Value::List(self.operations.iter().map(|op| op.result()).collect())
    }
}

/// Performs `auth`, then `request` with `Authorization: <prefix> <auth result>`.
pub struct BearerAuthOperation {
    auth: Box<dyn Operation>,
    request: Box<dyn Operation>,
    prefix: String,
}

impl BearerAuthOperation {
    pub fn new(auth: Box<dyn Operation>, request: Box<dyn Operation>) -> Self {
        Self::with_prefix(auth, request, "Bearer")
    }

    pub fn with_prefix(
        auth: Box<dyn Operation>,
        request: Box<dyn Operation>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            auth,
            request,
            prefix: prefix.into(),
        }
    }
}

impl Operation for BearerAuthOperation {
    fn perform(&mut self, client: &dyn HttpClient) -> Result<(), HttpError> {
        self.auth.perform(client)?;
        let token = match self.auth.result() {
            Value::Str(s) => s,
            other => other.to_string(),
        };
        let mut headers = Headers::new();
        headers.insert(
            "Authorization".to_string(),
            format!("{} {}", self.prefix, token),
        );
        self.request.perform(&WithHeaders::new(client, headers))
    }

    fn result(&self) -> Value {
        self.request.result()
    }
}
