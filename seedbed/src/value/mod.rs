// Scalar values and fields carried by fixture rows

use serde::Serialize;
use std::fmt;

/// A scalar fixture value. Only these three shapes become fields; anything
/// else in the document is reported as a diagnostic by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl Value {
    /// Convert a decoded YAML scalar. Returns `None` for nulls, floats,
    /// out-of-range integers, tagged values and collections.
    pub fn from_yaml(value: &serde_yaml::Value) -> Option<Self> {
        match value {
            serde_yaml::Value::Bool(b) => Some(Value::Boolean(*b)),
            serde_yaml::Value::Number(n) => n.as_i64().map(Value::Integer),
            serde_yaml::Value::String(s) => Some(Value::String(s.clone())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::String(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::String(s) => f.write_str(s),
        }
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

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

/// A single column of a row: key plus scalar value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Field {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_scalars() {
        let doc: serde_yaml::Value =
            serde_yaml::from_str("a: text\nb: 42\nc: true\nd: 1.5\ne: ~\nf: [1]").unwrap();

        assert_eq!(Value::from_yaml(&doc["a"]), Some(Value::String("text".into())));
        assert_eq!(Value::from_yaml(&doc["b"]), Some(Value::Integer(42)));
        assert_eq!(Value::from_yaml(&doc["c"]), Some(Value::Boolean(true)));
        assert_eq!(Value::from_yaml(&doc["d"]), None);
        assert_eq!(Value::from_yaml(&doc["e"]), None);
        assert_eq!(Value::from_yaml(&doc["f"]), None);
    }

    #[test]
    fn test_quoted_number_stays_string() {
        let doc: serde_yaml::Value = serde_yaml::from_str("id: '7'").unwrap();
        assert_eq!(Value::from_yaml(&doc["id"]), Some(Value::String("7".into())));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Integer(-3).to_string(), "-3");
        assert_eq!(Value::Boolean(false).to_string(), "false");
        assert_eq!(Value::from("x y").to_string(), "x y");
    }
}
