//! Predicates used to build field validators.
//!
//! Every predicate takes the field value, or `None` when the field is absent,
//! and answers whether it is acceptable. They are deliberately permissive
//! about representation: numbers and booleans may also arrive as strings.

use serde_json::Value;

/// The field is present, not null, and not an empty string.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// The field is a string with at least one non-whitespace character.
pub fn is_non_blank_string(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(s)) if !s.trim().is_empty())
}

/// The field is an integer, or a string that parses as one.
pub fn is_integer(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(n)) => n.is_i64(),
        Some(Value::String(s)) => s.parse::<i64>().is_ok(),
        _ => false,
    }
}

/// The numeric value of the field, if it is a finite number or a string holding one.
pub fn as_number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// The field is numeric.
pub fn is_numeric(value: Option<&Value>) -> bool {
    as_number(value).is_some()
}

/// The field is numeric and strictly greater than zero.
pub fn is_positive(value: Option<&Value>) -> bool {
    as_number(value).is_some_and(|n| n > 0.0)
}

/// The boolean value of the field, if it is a boolean or the string `"true"` or `"false"`.
pub fn as_boolean(value: Option<&Value>) -> Option<bool> {
    match value {
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    }
}

/// The field is boolean.
pub fn is_boolean(value: Option<&Value>) -> bool {
    as_boolean(value).is_some()
}
