//! Type normalizer for lshw captures
//!
//! Rewrites leaf values of a capture into canonical types so the same field
//! always carries the same JSON type across machines:
//! - boolean-like strings become booleans
//! - numeric strings become numbers
//! - `logicalname` always becomes a list
//! - `physid` and `version` always become strings
//!
//! The tree shape is never altered and normalization is idempotent.

mod coerce;

pub use coerce::{coerce_boolean, coerce_logicalname, coerce_numeric, coerce_string};

use crate::patterns::{FieldTables, NormalizerRules};
use serde_json::{Map, Value};

/// Normalizer driven by configurable field classification tables
#[derive(Debug, Clone, Default)]
pub struct LshwNormalizer {
    tables: FieldTables,
}

impl LshwNormalizer {
    /// Create a normalizer with the built-in tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer from configured tables
    pub fn from_rules(rules: &NormalizerRules) -> Self {
        Self {
            tables: FieldTables::from_rules(rules),
        }
    }

    /// Check that a document is a wrapped lshw capture
    ///
    /// Valid shape: `{"hardware": {"data": {"id": .., "class": ..}}}`
    pub fn is_valid_lshw(data: &Value) -> bool {
        data.get("hardware")
            .and_then(Value::as_object)
            .and_then(|hardware| hardware.get("data"))
            .and_then(Value::as_object)
            .map(|lshw| lshw.contains_key("id") && lshw.contains_key("class"))
            .unwrap_or(false)
    }

    /// Normalize a single capture
    ///
    /// Returns the rebuilt wrapper, or an empty map when the document is not a
    /// valid capture and should be skipped.
    pub fn normalize(&self, input_name: &str, input: &Value) -> Map<String, Value> {
        if !Self::is_valid_lshw(input) {
            tracing::info!(
                "Skipping {}: Not a valid lshw output (missing 'id' or 'class' fields)",
                input_name
            );
            return Map::new();
        }

        let hardware = &input["hardware"];
        let data = self.normalize_node(&hardware["data"]);

        let mut wrapper = Map::new();
        wrapper.insert(
            "node".to_string(),
            hardware.get("node").cloned().unwrap_or(Value::Null),
        );
        wrapper.insert("data".to_string(), data);
        wrapper.insert(
            "error".to_string(),
            hardware
                .get("error")
                .cloned()
                .unwrap_or_else(|| Value::String(String::new())),
        );

        tracing::debug!("Normalized capture {}", input_name);

        let mut result = Map::new();
        result.insert("hardware".to_string(), Value::Object(wrapper));
        result
    }

    /// Recursively normalize a node of the capture tree
    pub fn normalize_node(&self, node: &Value) -> Value {
        match node {
            Value::Object(map) => {
                let mut normalized = Map::with_capacity(map.len());
                for (key, value) in map {
                    normalized.insert(key.clone(), self.normalize_field(key, value));
                }
                Value::Object(normalized)
            }
            Value::Array(items) => Value::Array(self.normalize_items(items)),
            _ => node.clone(),
        }
    }

    fn normalize_field(&self, key: &str, value: &Value) -> Value {
        match (key, value) {
            ("configuration", Value::Object(config)) => {
                Value::Object(self.normalize_configuration(config))
            }
            ("capabilities", Value::Object(caps)) => {
                Value::Object(self.normalize_capabilities(caps))
            }
            ("logicalname", _) => coerce_logicalname(value),
            ("physid", _) | ("version", _) => coerce_string(value),
            _ if self.tables.is_boolean_field(key) => coerce_boolean(value),
            _ if self.tables.is_numeric_field(key) => coerce_numeric(value),
            (_, Value::Object(_)) => self.normalize_node(value),
            (_, Value::Array(items)) => Value::Array(self.normalize_items(items)),
            _ => value.clone(),
        }
    }

    fn normalize_items(&self, items: &[Value]) -> Vec<Value> {
        items
            .iter()
            .map(|item| match item {
                Value::Object(_) | Value::Array(_) => self.normalize_node(item),
                _ => item.clone(),
            })
            .collect()
    }

    fn normalize_configuration(&self, config: &Map<String, Value>) -> Map<String, Value> {
        config
            .iter()
            .map(|(key, value)| {
                let normalized = if self.tables.is_boolean_field(key) {
                    coerce_boolean(value)
                } else if self.tables.is_numeric_field(key) {
                    coerce_numeric(value)
                } else {
                    value.clone()
                };
                (key.clone(), normalized)
            })
            .collect()
    }

    fn normalize_capabilities(&self, capabilities: &Map<String, Value>) -> Map<String, Value> {
        capabilities
            .iter()
            .map(|(key, value)| {
                let normalized =
                    if self.tables.is_boolean_capability(key) || value.is_boolean() {
                        self.capability_flag(value)
                    } else {
                        value.clone()
                    };
                (key.clone(), normalized)
            })
            .collect()
    }

    /// Descriptive capability text means the capability is present unless it
    /// carries a negation marker. Substring matching can misfire on unrelated
    /// words that contain a marker.
    fn capability_flag(&self, value: &Value) -> Value {
        let Value::String(text) = value else {
            return value.clone();
        };

        let lower = text.trim().to_lowercase();
        match lower.as_str() {
            "true" | "false" | "yes" | "no" | "1" | "0" => coerce_boolean(value),
            _ => Value::Bool(!self.tables.has_negative_marker(&lower)),
        }
    }
}

/// Normalize a capture with the built-in tables
pub fn normalize(input_name: &str, input: &Value) -> Map<String, Value> {
    LshwNormalizer::new().normalize(input_name, input)
}
