//! Equality, ordering and arithmetic helpers, and the municipality checks.

use std::cmp::Ordering;

use crate::helpers::geo::{CARTAGENA, CORREGIMIENTOS};
use crate::Value;

/// Strict equality, integers and floats compare by numeric value.
pub fn eq(a: &Value, b: &Value) -> bool {
    a == b
}

pub fn gt(a: &Value, b: &Value) -> bool {
    compare(a, b) == Some(Ordering::Greater)
}

pub fn lt(a: &Value, b: &Value) -> bool {
    compare(a, b) == Some(Ordering::Less)
}

pub fn gte(a: &Value, b: &Value) -> bool {
    matches!(compare(a, b), Some(Ordering::Greater | Ordering::Equal))
}

pub fn lte(a: &Value, b: &Value) -> bool {
    matches!(compare(a, b), Some(Ordering::Less | Ordering::Equal))
}

/// Subtracts `b` from `a`.
///
/// The result is an integer when both operands are integers, and `None` when
/// either operand is not numeric.
pub fn subtract(a: &Value, b: &Value) -> Value {
    if let (Value::Integer(a), Value::Integer(b)) = (a, b) {
        if let Some(n) = a.checked_sub(*b) {
            return Value::Integer(n);
        }
    }
    let n = to_number(a) - to_number(b);
    if n.is_nan() {
        Value::None
    } else {
        Value::Float(n)
    }
}

/// Whether the municipality is Cartagena, ignoring case.
pub fn is_cartagena(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.to_lowercase() == CARTAGENA)
}

/// Whether the municipality is one of the corregimientos of Cartagena,
/// ignoring case.
pub fn is_corregimiento(value: &Value) -> bool {
    value.as_str().is_some_and(|s| {
        let s = s.to_lowercase();
        CORREGIMIENTOS.contains(&s.as_str())
    })
}

/// Orders two values.
///
/// Two strings compare lexicographically, everything else is compared as
/// numbers. Values that are not numbers never compare.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        _ => to_number(a).partial_cmp(&to_number(b)),
    }
}

/// Converts a value to a number, `NaN` if it is not numeric.
fn to_number(value: &Value) -> f64 {
    match value {
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Integer(n) => *n as f64,
        Value::Float(n) => *n,
        Value::String(s) => match s.trim() {
            "" => 0.0,
            s => s.parse().unwrap_or(f64::NAN),
        },
        Value::None | Value::List(_) | Value::Map(_) => f64::NAN,
    }
}
