//! Native functions behind the standard simple operators.
//!
//! Integer arithmetic wraps instead of panicking on overflow. Mixing an int
//! with a float promotes to float.

use rand::Rng;

use crate::evaluator::EvalError;
use crate::values::{Params, Value};

fn mismatch(op: &str, lhs: &Value, rhs: &Value) -> EvalError {
    EvalError::type_mismatch(format!(
        "unsupported operands for '{}': {} and {}",
        op,
        lhs.type_name(),
        rhs.type_name()
    ))
}

fn arity(expected: usize, args: &[Value]) -> EvalError {
    EvalError::ArityMismatch {
        expected,
        found: args.len(),
    }
}

/// Numeric addition, concatenation of strings and lists, map merge.
///
/// `null` on the left yields the right operand; a single operand is
/// returned unchanged.
pub fn add(args: &[Value], _params: &Params) -> Result<Value, EvalError> {
    match args {
        [] => Ok(Value::Null),
        [value] => Ok(value.clone()),
        [lhs, rhs] => add_pair(lhs, rhs),
        _ => Err(arity(2, args)),
    }
}

fn add_pair(lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
    match (lhs, rhs) {
        (Value::Null, other) => Ok(other.clone()),
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(*b))),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            Ok(Value::Float(float(lhs) + float(rhs)))
        }
        (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
        (Value::List(a), Value::List(b)) => {
            let mut items = a.clone();
            items.extend(b.iter().cloned());
            Ok(Value::List(items))
        }
        (Value::Map(a), Value::Map(b)) => {
            let mut merged = a.clone();
            merged.extend(b.iter().map(|(k, v)| (k.clone(), v.clone())));
            Ok(Value::Map(merged))
        }
        _ => Err(mismatch("+", lhs, rhs)),
    }
}

/// Subtraction; a single operand is negated.
pub fn subtract(args: &[Value], _params: &Params) -> Result<Value, EvalError> {
    match args {
        [value] => negate(value),
        [Value::Null, rhs] => negate(rhs),
        [Value::Int(a), Value::Int(b)] => Ok(Value::Int(a.wrapping_sub(*b))),
        [lhs @ (Value::Int(_) | Value::Float(_)), rhs @ (Value::Int(_) | Value::Float(_))] => {
            Ok(Value::Float(float(lhs) - float(rhs)))
        }
        [lhs, rhs] => Err(mismatch("-", lhs, rhs)),
        _ => Err(arity(2, args)),
    }
}

fn negate(value: &Value) -> Result<Value, EvalError> {
    match value {
        Value::Int(n) => Ok(Value::Int(n.wrapping_neg())),
        Value::Float(n) => Ok(Value::Float(-n)),
        other => Err(EvalError::type_mismatch(format!(
            "cannot negate {}",
            other.type_name()
        ))),
    }
}

/// Multiplication, or repetition of a string or list by an int.
///
/// Unary use yields `0`.
pub fn multiply(args: &[Value], _params: &Params) -> Result<Value, EvalError> {
    match args {
        [] | [_] => Ok(Value::Int(0)),
        [Value::Int(a), Value::Int(b)] => Ok(Value::Int(a.wrapping_mul(*b))),
        [lhs @ (Value::Int(_) | Value::Float(_)), rhs @ (Value::Int(_) | Value::Float(_))] => {
            Ok(Value::Float(float(lhs) * float(rhs)))
        }
        [Value::Str(s), Value::Int(n)] | [Value::Int(n), Value::Str(s)] => {
            repeated_len(s.len(), *n)?;
            Ok(Value::Str(s.repeat(count(*n))))
        }
        [Value::List(items), Value::Int(n)] | [Value::Int(n), Value::List(items)] => {
            let total = repeated_len(items.len(), *n)?;
            Ok(Value::List(items.iter().cloned().cycle().take(total).collect()))
        }
        [lhs, rhs] => Err(mismatch("*", lhs, rhs)),
        _ => Err(arity(2, args)),
    }
}

/// Division, always producing a float.
///
/// Unary use yields `1`.
pub fn divide(args: &[Value], _params: &Params) -> Result<Value, EvalError> {
    match args {
        [] | [_] => Ok(Value::Int(1)),
        [lhs, rhs] => match (lhs.as_float(), rhs.as_float()) {
            (Some(_), Some(divisor)) if divisor == 0.0 => Err(EvalError::DivisionByZero),
            (Some(a), Some(b)) => Ok(Value::Float(a / b)),
            _ => Err(mismatch("/", lhs, rhs)),
        },
        _ => Err(arity(2, args)),
    }
}

/// Sum of any number of operands, starting from `0`.
pub fn sum(args: &[Value], _params: &Params) -> Result<Value, EvalError> {
    args.iter()
        .try_fold(Value::Int(0), |total, value| add_pair(&total, value))
}

/// Uniform float in `[0, 1)`. Arguments are ignored.
pub fn random(_args: &[Value], _params: &Params) -> Result<Value, EvalError> {
    Ok(Value::Float(rand::thread_rng().r#gen::<f64>()))
}

fn float(value: &Value) -> f64 {
    value.as_float().unwrap_or(f64::NAN)
}

fn count(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

/// Longest string (in bytes) or list a repetition may build.
pub const MAX_REPEAT_LEN: usize = 1 << 24;

fn repeated_len(len: usize, n: i64) -> Result<usize, EvalError> {
    len.checked_mul(count(n))
        .filter(|&total| total <= MAX_REPEAT_LEN)
        .ok_or(EvalError::SizeLimitExceeded {
            max_len: MAX_REPEAT_LEN,
        })
}

#[cfg(test)]
mod tests {
    use indexmap::indexmap;

    use super::*;

    fn call(f: fn(&[Value], &Params) -> Result<Value, EvalError>, args: &[Value]) -> Result<Value, EvalError> {
        f(args, &Params::new())
    }

    #[test]
    fn test_add() {
        assert_eq!(call(add, &[Value::Int(2), Value::Int(3)]), Ok(Value::Int(5)));
        assert_eq!(call(add, &[Value::Int(1), Value::Float(0.5)]), Ok(Value::Float(1.5)));
        assert_eq!(call(add, &[Value::Null, Value::Int(4)]), Ok(Value::Int(4)));
        assert_eq!(call(add, &[Value::Int(i64::MAX), Value::Int(1)]), Ok(Value::Int(i64::MIN)));
        assert_eq!(call(add, &[Value::from("ab"), Value::from("c")]), Ok(Value::from("abc")));
        assert_eq!(call(add, &[Value::Int(7)]), Ok(Value::Int(7)));
        assert!(matches!(
            call(add, &[Value::from("a"), Value::Int(1)]),
            Err(EvalError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_add_containers() {
        let list = call(add, &[Value::List(vec![Value::Int(1)]), Value::List(vec![Value::Int(2)])]);
        assert_eq!(list, Ok(Value::List(vec![Value::Int(1), Value::Int(2)])));

        let merged = call(
            add,
            &[
                Value::Map(indexmap! { "a".to_string() => Value::Int(1), "b".to_string() => Value::Int(2) }),
                Value::Map(indexmap! { "b".to_string() => Value::Int(3) }),
            ],
        );
        assert_eq!(
            merged,
            Ok(Value::Map(indexmap! { "a".to_string() => Value::Int(1), "b".to_string() => Value::Int(3) }))
        );
    }

    #[test]
    fn test_subtract() {
        assert_eq!(call(subtract, &[Value::Int(1), Value::Int(3)]), Ok(Value::Int(-2)));
        assert_eq!(call(subtract, &[Value::Int(5)]), Ok(Value::Int(-5)));
        assert_eq!(call(subtract, &[Value::Float(1.5)]), Ok(Value::Float(-1.5)));
        assert_eq!(call(subtract, &[Value::Null, Value::Int(2)]), Ok(Value::Int(-2)));
        assert!(call(subtract, &[]).is_err());
    }

    #[test]
    fn test_multiply() {
        assert_eq!(call(multiply, &[Value::Int(6), Value::Int(7)]), Ok(Value::Int(42)));
        assert_eq!(call(multiply, &[Value::from("ab"), Value::Int(2)]), Ok(Value::from("abab")));
        assert_eq!(call(multiply, &[Value::Int(-1), Value::from("ab")]), Ok(Value::from("")));
        assert_eq!(
            call(multiply, &[Value::List(vec![Value::Null]), Value::Int(2)]),
            Ok(Value::List(vec![Value::Null, Value::Null]))
        );
        assert_eq!(call(multiply, &[Value::Int(9)]), Ok(Value::Int(0)));
    }

    #[test]
    fn test_multiply_repetition_is_bounded() {
        let too_large = Err(EvalError::SizeLimitExceeded {
            max_len: MAX_REPEAT_LEN,
        });
        assert_eq!(call(multiply, &[Value::from("ab"), Value::Int(i64::MAX)]), too_large);
        assert_eq!(call(multiply, &[Value::Int(i64::MAX), Value::from("ab")]), too_large);
        assert_eq!(
            call(multiply, &[Value::List(vec![Value::List(vec![Value::Int(1)])]), Value::Int(i64::MAX)]),
            too_large
        );
        assert_eq!(
            call(multiply, &[Value::List(vec![Value::Null; 2]), Value::Int(1 << 30)]),
            too_large
        );

        // Nothing to repeat, so any count is fine.
        assert_eq!(call(multiply, &[Value::from(""), Value::Int(i64::MAX)]), Ok(Value::from("")));
        assert_eq!(call(multiply, &[Value::List(vec![]), Value::Int(i64::MAX)]), Ok(Value::List(vec![])));
    }

    #[test]
    fn test_divide() {
        assert_eq!(call(divide, &[Value::Int(7), Value::Int(2)]), Ok(Value::Float(3.5)));
        assert_eq!(call(divide, &[Value::Int(7), Value::Int(0)]), Err(EvalError::DivisionByZero));
        assert_eq!(call(divide, &[Value::Float(7.0), Value::Float(0.0)]), Err(EvalError::DivisionByZero));
        assert_eq!(call(divide, &[Value::Int(3)]), Ok(Value::Int(1)));
    }

    #[test]
    fn test_sum_and_random() {
        assert_eq!(call(sum, &[]), Ok(Value::Int(0)));
        assert_eq!(
            call(sum, &[Value::Int(1), Value::Int(2), Value::Float(0.5)]),
            Ok(Value::Float(3.5))
        );
        let Ok(Value::Float(r)) = call(random, &[]) else {
            panic!("random should produce a float");
        };
        assert!((0.0..1.0).contains(&r));
    }
}
