#![allow(dead_code)]

use once_cell::sync::Lazy;

/// One Expression-dialect program and the rendering of its last value.
pub struct TestCase {
    pub name: &'static str,
    pub source: &'static str,
    pub display: &'static str,
}

/// Evaluates `input` in a fresh engine (after loading `definitions`, if
/// given) and compares the result.
#[macro_export]
macro_rules! test_case {
    (
        name: $name:ident,
        $(definitions: $defs:expr,)?
        input: $input:expr,
        result: $result:expr $(,)?
    ) => {
        #[test]
        fn $name() {
            let mut engine = rester::Engine::default();
            $(engine.define($defs).expect("definitions failed to load");)?
            pretty_assertions::assert_eq!(engine.evaluate($input), $result);
        }
    };
}

pub static ARITHMETIC_CASES: Lazy<Vec<TestCase>> = Lazy::new(|| {
    vec![
        TestCase {
            name: "addition",
            source: "1 + 2",
            display: "3",
        },
        TestCase {
            name: "mixed_promotion",
            source: "1 + 0.5",
            display: "1.5",
        },
        TestCase {
            name: "true_division",
            source: "7 / 2",
            display: "3.5",
        },
        TestCase {
            name: "division_is_always_float",
            source: "4 / 2",
            display: "2.0",
        },
        TestCase {
            name: "multiplicative_binds_tighter",
            source: "2 * 3 + 4",
            display: "10",
        },
        TestCase {
            name: "equal_precedence_is_right_associative",
            source: "10 / 4 * 2",
            display: "1.25",
        },
        TestCase {
            name: "string_concatenation",
            source: "\"ab\" + \"cd\"",
            display: "\"abcd\"",
        },
        TestCase {
            name: "string_repetition",
            source: "\"ab\" * 2",
            display: "\"abab\"",
        },
        TestCase {
            name: "list_concatenation",
            source: "[1, 2] + [3]",
            display: "[1, 2, 3]",
        },
        TestCase {
            name: "list_broadcast_right_scalar",
            source: "[1, 2] * 2",
            display: "[2, 4]",
        },
        TestCase {
            name: "unary_minus",
            source: "- 4",
            display: "-4",
        },
        TestCase {
            name: "sum_of_list",
            source: "1 + sum [2, 3]",
            display: "6",
        },
        TestCase {
            name: "sum_of_juxtaposed_values",
            source: "sum 1 2 3",
            display: "6",
        },
        TestCase {
            name: "null_is_additive_identity",
            source: "null + 5",
            display: "5",
        },
        TestCase {
            name: "map_merge",
            source: "@(a = 1) + @(b = 2)",
            display: "{a: 1, b: 2}",
        },
    ]
});
