//! Conversion of parameter values into JSON-native structures.

use chrono::SecondsFormat;
use serde_json::{Map, Number, Value};

use crate::kwargs::ParamValue;

/// Convert a parameter value into an equivalent JSON-native value.
///
/// Datetimes become RFC 3339 strings in UTC, non-finite floats become `null`,
/// and nested domains are replaced by their own projection.
pub fn to_json_safe(value: &ParamValue) -> Value {
    match value {
        ParamValue::Null => Value::Null,
        ParamValue::Bool(b) => Value::Bool(*b),
        ParamValue::Integer(i) => Value::Number((*i).into()),
        ParamValue::Unsigned(u) => Value::Number((*u).into()),
        ParamValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        ParamValue::String(s) => Value::String(s.clone()),
        ParamValue::DateTime(dt) => Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        ParamValue::List(items) => Value::Array(items.iter().map(to_json_safe).collect()),
        ParamValue::Map(kwargs) => Value::Object(
            kwargs
                .iter()
                .map(|(key, value)| (key.clone(), to_json_safe(value)))
                .collect(),
        ),
        ParamValue::Domain(domain) => Value::Object(domain.to_json_dict()),
    }
}

/// Rebuild a value with the keys of every object in sorted order.
pub fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Render a value as 2-space indented JSON with sorted keys.
pub fn render(value: &Value) -> String {
    format!("{:#}", sort_keys(value.clone()))
}

/// Runtime type name of a JSON value, used in error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
