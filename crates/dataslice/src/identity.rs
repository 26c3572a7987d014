//! Deterministic identifiers for JSON projections.
//!
//! Identifiers are the SHA-256 of a canonical byte form: compact JSON with
//! the keys of every object sorted. Equal projections always produce equal
//! identifiers regardless of key insertion order.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::json::{sort_keys, ToJsonDict};

/// Bytes of a JSON value in canonical form.
///
/// The inner bytes are private; `CanonicalBytes::new` is the only constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Serialize `value` compactly with recursively sorted keys.
    pub fn new(value: &Value) -> Self {
        Self(sort_keys(value.clone()).to_string().into_bytes())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Lowercase hex SHA-256 of canonical bytes (64 characters).
pub fn sha256_hex(data: &CanonicalBytes) -> String {
    format!("{:x}", Sha256::digest(data.as_bytes()))
}

/// A JSON mapping that can be reduced to an identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdDict(Map<String, Value>);

impl IdDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier over every key.
    pub fn to_id(&self) -> String {
        sha256_hex(&CanonicalBytes::new(&Value::Object(self.0.clone())))
    }

    /// Identifier over a subset of keys.
    ///
    /// `id_keys` selects the keys to hash (all keys when `None`); keys in
    /// `id_ignore_keys` are then removed. Selected keys that are missing are
    /// skipped.
    pub fn to_id_with(&self, id_keys: Option<&[&str]>, id_ignore_keys: &[&str]) -> String {
        let selected: Map<String, Value> = self
            .0
            .iter()
            .filter(|(key, _)| id_keys.is_none_or(|keys| keys.contains(&key.as_str())))
            .filter(|(key, _)| !id_ignore_keys.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        sha256_hex(&CanonicalBytes::new(&Value::Object(selected)))
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for IdDict {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl ToJsonDict for IdDict {
    fn to_json_dict(&self) -> Map<String, Value> {
        self.0.clone()
    }
}
