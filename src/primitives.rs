//! Bootstrap primitives
//!
//! The native procedures installed into every fresh session: the variadic
//! folds `+` and `*`, negation/subtraction `-`, and the relational
//! procedures `=`, `<`, `>`, together with the constants `true` and `false`.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::interpreter::{Environment, EvalError};
use crate::language::Value;
use crate::numeric::Number;

// ============================================================================
// Registration
// ============================================================================

/// Install the bootstrap bindings into `env`.
pub fn register_primitives(env: &Rc<Environment>) {
    env.define("true".to_string(), Value::Boolean(true));
    env.define("false".to_string(), Value::Boolean(false));

    env.define("+".to_string(), Value::Primitive(add));
    env.define("-".to_string(), Value::Primitive(subtract));
    env.define("*".to_string(), Value::Primitive(multiply));
    env.define("=".to_string(), Value::Primitive(equal));
    env.define("<".to_string(), Value::Primitive(less_than));
    env.define(">".to_string(), Value::Primitive(greater_than));
}

// ============================================================================
// Operand Helpers
// ============================================================================

fn extract_integer<'a>(value: &'a Value, primitive: &'static str) -> Result<&'a Number, EvalError> {
    match value {
        Value::Integer(number) => Ok(number),
        other => Err(EvalError::IntegerExpected {
            primitive,
            value: other.clone(),
        }),
    }
}

fn exactly_two<'a>(
    operands: &'a [Value],
    primitive: &'static str,
) -> Result<(&'a Value, &'a Value), EvalError> {
    match operands {
        [first, second] => Ok((first, second)),
        _ => Err(EvalError::PrimitiveArity {
            primitive,
            expected: "exactly 2",
            got: operands.len(),
        }),
    }
}

// ============================================================================
// Numeric Primitives
// ============================================================================

/// Usage: (+ 1 2 3) => 6; (+) => 0
fn add(operands: &[Value]) -> Result<Value, EvalError> {
    let mut sum = Number::Int(0);
    for operand in operands {
        sum = sum.add(extract_integer(operand, "+")?);
    }
    Ok(Value::Integer(sum))
}

/// Usage: (* 2 3 4) => 24; (*) => 1
fn multiply(operands: &[Value]) -> Result<Value, EvalError> {
    let mut product = Number::Int(1);
    for operand in operands {
        product = product.mul(extract_integer(operand, "*")?);
    }
    Ok(Value::Integer(product))
}

/// Usage: (- 5) => -5; (- 5 2) => 3
fn subtract(operands: &[Value]) -> Result<Value, EvalError> {
    match operands {
        [value] => Ok(Value::Integer(extract_integer(value, "-")?.neg())),
        [minuend, subtrahend] => {
            let minuend = extract_integer(minuend, "-")?;
            let subtrahend = extract_integer(subtrahend, "-")?;
            Ok(Value::Integer(minuend.sub(subtrahend)))
        }
        _ => Err(EvalError::PrimitiveArity {
            primitive: "-",
            expected: "1 or 2",
            got: operands.len(),
        }),
    }
}

// ============================================================================
// Relational Primitives
// ============================================================================

/// Usage: (= 1 1) => true; (= true false) => false
///
/// Compares any two values: integers by numeric value regardless of width,
/// booleans by value, procedures by identity.
fn equal(operands: &[Value]) -> Result<Value, EvalError> {
    let (first, second) = exactly_two(operands, "=")?;
    Ok(Value::Boolean(first == second))
}

/// Usage: (< 1 2) => true
fn less_than(operands: &[Value]) -> Result<Value, EvalError> {
    compare(operands, "<", Ordering::Less)
}

/// Usage: (> 1 2) => false
fn greater_than(operands: &[Value]) -> Result<Value, EvalError> {
    compare(operands, ">", Ordering::Greater)
}

fn compare(
    operands: &[Value],
    primitive: &'static str,
    wanted: Ordering,
) -> Result<Value, EvalError> {
    let (first, second) = exactly_two(operands, primitive)?;
    let first = extract_integer(first, primitive)?;
    let second = extract_integer(second, primitive)?;
    Ok(Value::Boolean(first.cmp(second) == wanted))
}
