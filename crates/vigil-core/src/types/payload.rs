//! Tolerant typed reads over heterogeneous signal payloads
//!
//! Inbound payloads are arbitrary JSON objects produced by capture
//! SDKs across several platforms, so the same field may arrive as a
//! native number, a numeric string, or a stringly boolean. All type
//! coercion for rule evaluation lives here; rules read through this
//! wrapper and never convert values themselves.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Signal payload: a string -> JSON value map with coercing accessors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalPayload(HashMap<String, Value>);

impl SignalPayload {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Raw access to the underlying JSON value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String read; non-string values yield `None`
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Float read tolerating integers and numeric strings
    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        match self.0.get(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Integer read tolerating floats (truncated) and numeric strings
    pub fn get_i64(&self, key: &str, default: i64) -> i64 {
        match self.0.get(key) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(default),
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
                    .unwrap_or(default)
            }
            _ => default,
        }
    }

    /// Boolean read tolerating `"true"`/`"false"`, `"1"`/`"0"`, and 0/1 numbers
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.0.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => default,
            },
            Some(Value::Number(n)) => match n.as_i64() {
                Some(1) => true,
                Some(0) => false,
                _ => default,
            },
            _ => default,
        }
    }
}

impl From<HashMap<String, Value>> for SignalPayload {
    fn from(map: HashMap<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for SignalPayload {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
