// Leaf coercions used by the type normalizer
//
// Every function is total: a value that cannot be converted is returned
// unchanged rather than reported as an error.
use serde_json::{Number, Value};

/// Parse the explicit boolean tokens accepted for boolean fields
pub fn parse_bool_token(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Convert common boolean representations to a JSON boolean
pub fn coerce_boolean(value: &Value) -> Value {
    match value {
        Value::Bool(_) => value.clone(),
        Value::String(s) => match parse_bool_token(s) {
            Some(b) => Value::Bool(b),
            None => value.clone(),
        },
        Value::Number(n) => Value::Bool(n.as_f64().map(|f| f != 0.0).unwrap_or(true)),
        _ => value.clone(),
    }
}

/// Convert numeric strings to numbers, integers first
pub fn coerce_numeric(value: &Value) -> Value {
    match value {
        Value::String(s) => parse_number(s).map(Value::Number).unwrap_or_else(|| value.clone()),
        _ => value.clone(),
    }
}

fn parse_number(s: &str) -> Option<Number> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    if let Ok(u) = s.parse::<u64>() {
        return Some(Number::from(u));
    }
    // Non-finite floats have no JSON representation and stay strings
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Wrap a single logical name in a list
pub fn coerce_logicalname(value: &Value) -> Value {
    match value {
        Value::String(_) => Value::Array(vec![value.clone()]),
        _ => value.clone(),
    }
}

/// Render any non-null scalar as a string
pub fn coerce_string(value: &Value) -> Value {
    match value {
        Value::Null | Value::String(_) => value.clone(),
        other => Value::String(other.to_string()),
    }
}
