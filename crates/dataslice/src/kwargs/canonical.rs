//! Canonical parameter mappings.
//!
//! A canonical mapping contains no empty values at any depth, and every
//! nested mapping is itself a [`DomainKwargs`]. Two inputs that differ only
//! in empty entries or key order canonicalize to equal mappings.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::trace;

use super::value::ParamValue;
use crate::error::{DomainError, Result};
use crate::json::{self, ToJsonDict};

/// Ordered mapping of domain keyword parameters.
///
/// Insertion order is kept for display; equality ignores it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainKwargs(IndexMap<String, ParamValue>);

impl DomainKwargs {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from any serializable value that serializes to an object.
    pub fn from_serializable(value: &impl Serialize) -> Result<Self> {
        Self::try_from(serde_json::to_value(value)?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, ParamValue> {
        self.0.iter()
    }

    /// Insert a value as given, without canonicalizing it.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a key, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.shift_remove(key)
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Return the canonical form of this mapping.
    pub fn canonicalize(self) -> Self {
        let entries = self
            .0
            .into_iter()
            .filter_map(|(key, value)| {
                let value = canonicalize_value(value);
                if value.is_empty() {
                    trace!(key = %key, "pruned empty kwarg");
                    None
                } else {
                    Some((key, value))
                }
            })
            .collect();
        Self(entries)
    }

    /// Canonicalize in place; the result equals [`DomainKwargs::canonicalize`].
    pub fn canonicalize_in_place(&mut self) {
        self.0.retain(|key, value| {
            canonicalize_value_in_place(value);
            let keep = !value.is_empty();
            if !keep {
                trace!(key = %key, "pruned empty kwarg");
            }
            keep
        });
    }

    /// Returns true if canonicalizing would leave this mapping unchanged.
    pub fn is_canonical(&self) -> bool {
        self.0.values().all(|value| !value.is_empty() && value_is_canonical(value))
    }

    /// Plain copy of the underlying entries.
    pub fn to_dict(&self) -> IndexMap<String, ParamValue> {
        self.0.clone()
    }

    pub fn into_inner(self) -> IndexMap<String, ParamValue> {
        self.0
    }
}

impl ToJsonDict for DomainKwargs {
    fn to_json_dict(&self) -> Map<String, Value> {
        self.0
            .iter()
            .map(|(key, value)| (key.clone(), json::to_json_safe(value)))
            .collect()
    }
}

/// Canonicalize an optional value.
///
/// `None` stays `None`, so "no kwargs supplied" remains distinguishable from
/// "empty kwargs supplied".
pub fn canonicalize(source: Option<ParamValue>) -> Option<ParamValue> {
    source.map(canonicalize_value)
}

/// Canonicalize a single value, descending into maps and lists.
///
/// Nested domains pass through unchanged.
pub fn canonicalize_value(value: ParamValue) -> ParamValue {
    match value {
        ParamValue::Map(kwargs) => ParamValue::Map(kwargs.canonicalize()),
        ParamValue::List(items) => ParamValue::List(
            items
                .into_iter()
                .map(canonicalize_value)
                .filter(|item| !item.is_empty())
                .collect(),
        ),
        other => other,
    }
}

fn canonicalize_value_in_place(value: &mut ParamValue) {
    match value {
        ParamValue::Map(kwargs) => kwargs.canonicalize_in_place(),
        ParamValue::List(items) => {
            items.iter_mut().for_each(canonicalize_value_in_place);
            items.retain(|item| !item.is_empty());
        }
        _ => {}
    }
}

fn value_is_canonical(value: &ParamValue) -> bool {
    match value {
        ParamValue::Map(kwargs) => kwargs.is_canonical(),
        ParamValue::List(items) => items
            .iter()
            .all(|item| !item.is_empty() && value_is_canonical(item)),
        _ => true,
    }
}

impl From<Map<String, Value>> for DomainKwargs {
    fn from(map: Map<String, Value>) -> Self {
        Self(
            map.into_iter()
                .map(|(key, value)| (key, ParamValue::from(value)))
                .collect(),
        )
    }
}

impl From<IndexMap<String, ParamValue>> for DomainKwargs {
    fn from(map: IndexMap<String, ParamValue>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for DomainKwargs {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::from(map)),
            other => Err(DomainError::MalformedKwargs(format!(
                "expected a mapping, got {} {}",
                json::json_kind(&other),
                other
            ))),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for DomainKwargs
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a DomainKwargs {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = indexmap::map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for DomainKwargs {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json_dict().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DomainKwargs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::from)
    }
}
