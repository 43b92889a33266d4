//! Tagged value model for nested structured data.
//!
//! Every value handled by this crate is one of a closed set of shapes:
//! a primitive, an ordered sequence, or an ordered record. Path resolution
//! pattern-matches on shape instead of relying on runtime duck typing.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered mapping from field name to value.
///
/// Field order is preserved through extraction and serialization, which is
/// why this is an `IndexMap` rather than a `HashMap`.
pub type Record = IndexMap<String, Value>;

/// A single value inside a nested record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Record(Record),
}

impl Value {
    /// The name of this value's shape.
    ///
    /// Unlike the dynamic languages this model is drawn from, `null` is its
    /// own shape here, not a record.
    ///
    /// # Example
    /// ```
    /// use pluck::Value;
    ///
    /// assert_eq!(Value::Int(31).type_name(), "int");
    /// assert_eq!(Value::Null.type_name(), "null");
    /// ```
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Record(_) => "record",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(map) => Some(map),
            _ => None,
        }
    }

    /// Get a field of a record value by name.
    ///
    /// Returns `None` if the value is not a record or the field is missing.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Record(map) => map.get(key),
            _ => None,
        }
    }

    /// Get an element of a sequence value by position.
    ///
    /// Returns `None` if the value is not a sequence or the index is out of
    /// bounds.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Sequence(items) => items.get(index),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "{}", s),
            Value::Sequence(_) | Value::Record(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                write!(f, "{}", json)
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Record> for Value {
    fn from(map: Record) -> Self {
        Value::Record(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    Value::Null
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Record(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::Number(i.into()),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Record(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Bool(true).type_name(), "bool");
        assert_eq!(Value::Int(31).type_name(), "int");
        assert_eq!(Value::Float(1.5).type_name(), "float");
        assert_eq!(Value::String("Hello".to_string()).type_name(), "string");
        assert_eq!(Value::Sequence(vec![]).type_name(), "sequence");
        assert_eq!(Value::Record(Record::new()).type_name(), "record");
    }

    #[test]
    fn test_from_json_value() {
        let value = Value::from(json!({
            "name": "Ichigo Kurosaki",
            "age": 27,
            "alive": true,
            "score": 9.5,
            "powers": ["Hollow Mask", "Bankai"],
            "series": null
        }));

        assert_eq!(value.get("name").and_then(Value::as_str), Some("Ichigo Kurosaki"));
        assert_eq!(value.get("age").and_then(Value::as_int), Some(27));
        assert_eq!(value.get("alive").and_then(Value::as_bool), Some(true));
        assert_eq!(value.get("score").and_then(Value::as_float), Some(9.5));
        assert!(value.get("series").map(Value::is_null).unwrap_or(false));

        let powers = value.get("powers").and_then(Value::as_sequence).unwrap();
        assert_eq!(powers.len(), 2);
        assert_eq!(powers[1].as_str(), Some("Bankai"));
    }

    #[test]
    fn test_json_round_trip_preserves_field_order() {
        let value = Value::from(json!({"z": 1, "a": 2, "m": 3}));

        let record = value.as_record().unwrap();
        let keys: Vec<&String> = record.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);

        let back = serde_json::Value::from(value.clone());
        assert_eq!(Value::from(back), value);
    }

    #[test]
    fn test_deserialize_untagged() {
        let value: Value = serde_json::from_str(r#"{"edad": 27, "anime": "Bleach"}"#).unwrap();

        assert_eq!(value.get("edad").and_then(Value::as_int), Some(27));
        assert_eq!(value.get("anime").and_then(Value::as_str), Some("Bleach"));
    }

    #[test]
    fn test_get_on_wrong_shape() {
        assert_eq!(Value::Int(5).get("a"), None);
        assert_eq!(Value::Int(5).get_index(0), None);
        assert_eq!(Value::Sequence(vec![Value::Int(1)]).get_index(3), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Int(31).to_string(), "31");
        assert_eq!(Value::String("Hello".to_string()).to_string(), "Hello");
        assert_eq!(
            Value::Sequence(vec![Value::Int(1), Value::Int(2)]).to_string(),
            "[1,2]"
        );
    }
}
