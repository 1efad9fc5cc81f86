use std::cell::RefCell;

use indoc::indoc;
use pretty_assertions::assert_eq;
use rester::{
    Engine, Value,
    http::{
        BearerAuthOperation, Headers, HttpClient, HttpError, Method, Operation, RequestDescriptor,
        RequestOperation, SequenceOperation,
    },
};

/// Answers `/login` with a token and echoes every other URL.
#[derive(Default)]
struct RecordingClient {
    sent: RefCell<Vec<(Method, String, Option<String>)>>,
}

impl HttpClient for RecordingClient {
    fn send(
        &self,
        url: &str,
        method: Method,
        _body: &Value,
        headers: Option<&Headers>,
    ) -> Result<Value, HttpError> {
        let auth = headers.and_then(|h| h.get("Authorization").cloned());
        self.sent.borrow_mut().push((method, url.to_string(), auth));
        if url.ends_with("/login") {
            Ok(Value::from("t0ken"))
        } else {
            Ok(Value::from(url))
        }
    }
}

const API: &str = indoc! {r#"
    login is post "/login" with data {user: "me"};
    profile is get "/me";
"#};

fn operation(engine: &mut Engine, name: &str) -> Box<dyn Operation> {
    let value = engine.lookup(name).unwrap();
    let descriptor = RequestDescriptor::try_from(&value).unwrap();
    Box::new(RequestOperation::from_descriptor(&descriptor).unwrap())
}

#[test]
fn test_descriptor_from_definition() {
    let mut engine = Engine::default();
    engine.define(API).unwrap();
    let descriptor = RequestDescriptor::try_from(&engine.lookup("login").unwrap()).unwrap();
    assert_eq!(descriptor.method, Method::Post);
    assert_eq!(descriptor.args, vec![Value::from("/login")]);
    assert_eq!(descriptor.params.get("data").unwrap().to_string(), "{user: \"me\"}");
}

#[test]
fn test_authenticated_sequence() {
    let mut engine = Engine::default();
    engine.define(API).unwrap();

    let authed = BearerAuthOperation::new(
        operation(&mut engine, "login"),
        operation(&mut engine, "profile"),
    );
    let mut sequence = SequenceOperation::new(vec![Box::new(authed)], "http://api");

    let client = RecordingClient::default();
    sequence.perform(&client).unwrap();

    assert_eq!(
        sequence.result(),
        Value::List(vec![Value::from("http://api/me")])
    );
    assert_eq!(
        client.sent.into_inner(),
        vec![
            (Method::Post, "http://api/login".to_string(), None),
            (
                Method::Get,
                "http://api/me".to_string(),
                Some("Bearer t0ken".to_string())
            ),
        ]
    );
}

#[test]
fn test_descriptor_rejects_plain_values() {
    let err = RequestDescriptor::try_from(&Value::Int(1)).unwrap_err();
    assert!(matches!(err, HttpError::InvalidDescriptor(_)));
}
