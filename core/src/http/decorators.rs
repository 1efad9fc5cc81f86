//! Clients that adjust requests before handing them to an inner client.

use super::{Headers, HttpClient, HttpError, Method};
use crate::values::Value;

/// Prefixes every URL with `base_url`.
pub struct WithBaseUrl<'a> {
    inner: &'a dyn HttpClient,
    base_url: String,
}

impl<'a> WithBaseUrl<'a> {
    pub fn new(inner: &'a dyn HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            inner,
            base_url: base_url.into(),
        }
    }
}

impl HttpClient for WithBaseUrl<'_> {
    fn send(
        &self,
        url: &str,
        method: Method,
        body: &Value,
        headers: Option<&Headers>,
    ) -> Result<Value, HttpError> {
        let full = format!("{}{}", self.base_url, url);
        self.inner.send(&full, method, body, headers)
    }
}

/// Supplies default headers to requests sent without any.
pub struct WithHeaders<'a> {
    inner: &'a dyn HttpClient,
    headers: Headers,
}

impl<'a> WithHeaders<'a> {
    pub fn new(inner: &'a dyn HttpClient, headers: Headers) -> Self {
        Self { inner, headers }
    }
}

impl HttpClient for WithHeaders<'_> {
    fn send(
        &self,
        url: &str,
        method: Method,
        body: &Value,
        headers: Option<&Headers>,
    ) -> Result<Value, HttpError> {
        let headers = headers.or(Some(&self.headers));
        self.inner.send(url, method, body, headers)
    }
}

#[cfg(test)]
mod tests {
    use indexmap::indexmap;

    use super::*;
    use crate::http::mock::MockClient;

    #[test]
    fn test_base_url_prefix() {
        let mock = MockClient::default();
        let client = WithBaseUrl::new(&mock, "http://api");
        let result = client.send("/users", Method::Get, &Value::Null, None);
        assert_eq!(result, Ok(Value::from("http://api/users")));
    }

    #[test]
    fn test_headers_only_when_absent() {
        let mock = MockClient::default();
        let defaults = indexmap! { "X-A".to_string() => "1".to_string() };
        let client = WithHeaders::new(&mock, defaults.clone());

        client.send("/a", Method::Get, &Value::Null, None).unwrap();
        let explicit = indexmap! { "X-B".to_string() => "2".to_string() };
        client
            .send("/b", Method::Get, &Value::Null, Some(&explicit))
            .unwrap();

        let sent = mock.sent.borrow();
        assert_eq!(sent[0].headers, Some(defaults));
        assert_eq!(sent[1].headers, Some(explicit));
    }
}
