use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier of a row in the record store.
///
/// Grist hands out integer row ids, but references can also arrive as text
/// depending on how a column is typed, so both shapes are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Grist stores an unset reference column as `0`.
    pub fn is_blank(&self) -> bool {
        match self {
            RecordId::Int(n) => *n == 0,
            RecordId::Text(s) => s.trim().is_empty(),
        }
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(RecordId::Int),
            Value::String(s) => Some(RecordId::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}

impl From<RecordId> for Value {
    fn from(id: RecordId) -> Self {
        match id {
            RecordId::Int(n) => Value::from(n),
            RecordId::Text(s) => Value::String(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Text view of a field. Numbers are rendered, anything else reads as empty.
    pub fn text(&self, name: &str) -> String {
        match self.fields.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    pub fn optional_text(&self, name: &str) -> Option<String> {
        match self.fields.get(name) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    pub fn reference(&self, name: &str) -> Option<RecordId> {
        self.fields.get(name).and_then(RecordId::from_value)
    }
}
