//! Nested parameter values carried by domain kwargs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::canonical::DomainKwargs;
use crate::domain::Domain;
use crate::json;

/// A single value inside a domain's kwargs.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`; kept exact rather than widened to a float.
    Unsigned(u64),
    Float(f64),
    String(String),
    /// Projected as an RFC 3339 string.
    DateTime(DateTime<Utc>),
    List(Vec<ParamValue>),
    Map(DomainKwargs),
    /// A nested domain, already canonical.
    Domain(Box<Domain>),
}

impl ParamValue {
    /// Returns true for `null`, empty strings, empty lists and empty maps.
    ///
    /// Falsy numerics (`0`, `0.0`, `false`) are not empty.
    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::Null => true,
            ParamValue::String(s) => s.is_empty(),
            ParamValue::List(items) => items.is_empty(),
            ParamValue::Map(kwargs) => kwargs.is_empty(),
            ParamValue::Bool(_)
            | ParamValue::Integer(_)
            | ParamValue::Unsigned(_)
            | ParamValue::Float(_)
            | ParamValue::DateTime(_)
            | ParamValue::Domain(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&DomainKwargs> {
        match self {
            ParamValue::Map(kwargs) => Some(kwargs),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// JSON-safe projection of this value.
    pub fn to_json(&self) -> Value {
        json::to_json_safe(self)
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ParamValue::Null,
            Value::Bool(b) => ParamValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ParamValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    ParamValue::Unsigned(u)
                } else {
                    n.as_f64().map_or(ParamValue::Null, ParamValue::Float)
                }
            }
            Value::String(s) => ParamValue::String(s),
            Value::Array(items) => ParamValue::List(items.into_iter().map(ParamValue::from).collect()),
            Value::Object(map) => ParamValue::Map(DomainKwargs::from(map)),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Integer(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Integer(value.into())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(ParamValue::Unsigned(value), ParamValue::Integer)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<DateTime<Utc>> for ParamValue {
    fn from(value: DateTime<Utc>) -> Self {
        ParamValue::DateTime(value)
    }
}

impl From<DomainKwargs> for ParamValue {
    fn from(value: DomainKwargs) -> Self {
        ParamValue::Map(value)
    }
}

impl From<Domain> for ParamValue {
    fn from(value: Domain) -> Self {
        ParamValue::Domain(Box::new(value))
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(value: Vec<T>) -> Self {
        ParamValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(ParamValue::from)
    }
}
