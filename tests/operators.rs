use indoc::indoc;
use pretty_assertions::assert_eq;
use rester::{
    Engine, EngineOptions, Error, EvalError, ExecutionMode, NativeFunction, OperatorBinding,
    Params, Value, operators, precedence,
};

#[macro_use]
mod cases;

#[test]
fn test_arithmetic_cases() {
    for case in cases::ARITHMETIC_CASES.iter() {
        let mut engine = Engine::default();
        let value = engine
            .evaluate(case.source)
            .unwrap_or_else(|e| panic!("case '{}' failed: {}", case.name, e));
        assert_eq!(value.to_string(), case.display, "case '{}'", case.name);
    }
}

test_case! {
    name: test_division_by_zero,
    input: "1 / 0",
    result: Err(Error::Eval(EvalError::DivisionByZero)),
}

test_case! {
    name: test_string_repetition_is_bounded,
    input: "\"ab\" * 9223372036854775807",
    result: Err(Error::Eval(EvalError::SizeLimitExceeded { max_len: operators::MAX_REPEAT_LEN })),
}

test_case! {
    name: test_splatted_list_repetition_is_bounded,
    input: "* [[1], 9223372036854775807]",
    result: Err(Error::Eval(EvalError::SizeLimitExceeded { max_len: operators::MAX_REPEAT_LEN })),
}

test_case! {
    name: test_member_access,
    input: "conf = @(host = \"h\"; port = 80); conf . port",
    result: Ok(Value::Int(80)),
}

test_case! {
    name: test_chained_access_needs_parentheses,
    input: "m = @(inner = @(v = 1)); (m . inner) . v",
    result: Ok(Value::Int(1)),
}

test_case! {
    name: test_missing_member,
    input: "m = @(a = 1); m . b",
    result: Err(Error::Eval(EvalError::MissingMember { name: "b".to_string() })),
}

test_case! {
    name: test_extract_named_binding,
    input: "b @ { a = 20; b = a + 1 }",
    result: Ok(Value::Int(21)),
}

test_case! {
    name: test_dynamic_identifier,
    input: "key = \"dynamic\"; id key = 3; dynamic",
    result: Ok(Value::Int(3)),
}

test_case! {
    name: test_identifiers_introduced,
    input: "a = 1; identifiers { a = 2; b = 3; c = 4 }",
    result: Ok(Value::List(vec![Value::from("b"), Value::from("c")])),
}

test_case! {
    name: test_quoted_block_as_value,
    input: "body = { n = 4; n * n }; $ body",
    result: Ok(Value::Int(16)),
}

#[test]
fn test_closures_compose() {
    let mut engine = Engine::default();
    let source = indoc! {"
        add = (a, b) -> a + b;
        inc = add 1;
        twice = (f, x) -> f (f x);
        twice inc 5
    "};
    assert_eq!(engine.evaluate(source), Ok(Value::Int(7)));
}

#[test]
fn test_closure_captures_definition_time_bindings() {
    let mut engine = Engine::default();
    let values = engine
        .run("rate = 2; scale = x -> x * rate; rate = 100; scale 3")
        .unwrap();
    assert_eq!(values.last(), Some(&Value::Int(6)));
}

#[test]
fn test_closure_display() {
    let mut engine = Engine::default();
    let value = engine.evaluate("(x, y) -> x + y").unwrap();
    assert_eq!(value.to_string(), "(x, y) -> x + y");
}

fn concat(args: &[Value], _params: &Params) -> Result<Value, EvalError> {
    match args {
        [lhs, rhs] => Ok(Value::from(format!("{}{}", lhs, rhs))),
        _ => Err(EvalError::ArityMismatch {
            expected: 2,
            found: args.len(),
        }),
    }
}

#[test]
fn test_host_operator_precedence() {
    let mut engine = Engine::default();
    engine.register(
        "++",
        OperatorBinding::simple(NativeFunction::new("++", concat), precedence::ADDITIVE - 1),
    );
    // `++` binds looser than `+`, so the sum happens first.
    assert_eq!(engine.evaluate("1 + 2 ++ 3"), Ok(Value::from("33")));
}

#[test]
fn test_statement_isolation() {
    let mut engine = Engine::new(EngineOptions {
        mode: ExecutionMode::Isolated,
        ..EngineOptions::default()
    });
    let outcomes = engine.execute("a = 1; missing; b = a + 1").unwrap();
    assert_eq!(
        outcomes,
        vec![
            Ok(Value::Int(1)),
            Err(EvalError::unbound("missing")),
            Ok(Value::Int(2)),
        ]
    );
}

#[test]
fn test_fail_fast_is_default() {
    let mut engine = Engine::default();
    let outcomes = engine.execute("a = 1; missing; b = a + 1").unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(!engine.context().owns("b"));
}
