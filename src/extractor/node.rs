// Defensive accessors over capture nodes
//
// Captures come from heterogeneous machines, so every accessor tolerates a
// missing key, a null, or a value of the wrong JSON type.
use serde_json::{Map, Value};

/// Read-only view of an lshw node stored as a JSON value
pub trait NodeExt {
    /// Non-empty string field
    fn str_field(&self, key: &str) -> Option<&str>;

    /// String field copied verbatim, with scalars rendered as text
    fn text_field(&self, key: &str) -> Option<String>;

    /// Child nodes, or an empty slice when absent or malformed
    fn children(&self) -> &[Value];

    /// `configuration` mapping when present
    fn configuration(&self) -> Option<&Map<String, Value>>;

    /// `capabilities` mapping when present
    fn capabilities(&self) -> Option<&Map<String, Value>>;

    /// Non-zero numeric `size` (bytes or Hz depending on class)
    fn size(&self) -> Option<f64>;

    fn class(&self) -> Option<&str> {
        self.str_field("class")
    }

    fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    fn description(&self) -> Option<&str> {
        self.str_field("description")
    }

    fn businfo(&self) -> Option<&str> {
        self.str_field("businfo")
    }

    fn has_class(&self, class: &str) -> bool {
        self.class() == Some(class)
    }
}

impl NodeExt for Value {
    fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    fn text_field(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_text)
    }

    fn children(&self) -> &[Value] {
        self.get("children")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn configuration(&self) -> Option<&Map<String, Value>> {
        self.get("configuration").and_then(Value::as_object)
    }

    fn capabilities(&self) -> Option<&Map<String, Value>> {
        self.get("capabilities").and_then(Value::as_object)
    }

    fn size(&self) -> Option<f64> {
        self.get("size").and_then(positive_number)
    }
}

/// Render a scalar as text; null and containers yield `None`
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Non-empty scalar text from a configuration mapping
pub fn config_text(config: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    config
        .and_then(|c| c.get(key))
        .and_then(scalar_text)
        .filter(|s| !s.is_empty())
}

/// Numeric value that counts as present (non-zero), accepting numeric strings
pub fn positive_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (n.is_finite() && n != 0.0).then_some(n)
}

/// Whole-number count such as `cores` or `threads`, as string or number
pub fn count_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}
