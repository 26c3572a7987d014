//! Closed type enumerations used to classify domains.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{DomainError, Result};
use crate::json::{self, ToJsonDict};

/// What a domain targets within a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainType {
    /// A single column.
    Column,
    /// An ordered pair of columns.
    ColumnPair,
    /// An arbitrary set of columns.
    Multicolumn,
    /// The whole table.
    Table,
}

impl DomainType {
    /// Every member, in declaration order.
    pub const ALL: [DomainType; 4] = [
        DomainType::Column,
        DomainType::ColumnPair,
        DomainType::Multicolumn,
        DomainType::Table,
    ];

    /// Member name, e.g. `COLUMN_PAIR`.
    pub fn name(&self) -> &'static str {
        match self {
            DomainType::Column => "COLUMN",
            DomainType::ColumnPair => "COLUMN_PAIR",
            DomainType::Multicolumn => "MULTICOLUMN",
            DomainType::Table => "TABLE",
        }
    }

    /// Projected value, e.g. `column_pair`.
    pub fn value(&self) -> &'static str {
        match self {
            DomainType::Column => "column",
            DomainType::ColumnPair => "column_pair",
            DomainType::Multicolumn => "multicolumn",
            DomainType::Table => "table",
        }
    }

    /// Look up a member by its exact (case-sensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Look up a member by its projected value.
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.value() == value)
    }
}

impl fmt::Display for DomainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// A domain type tag as supplied by a caller, before resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDomainType {
    /// Already a resolved member.
    Member(DomainType),
    /// A member name to look up.
    Name(String),
    /// An arbitrary JSON value (only strings can resolve).
    Json(Value),
}

impl From<DomainType> for RawDomainType {
    fn from(value: DomainType) -> Self {
        RawDomainType::Member(value)
    }
}

impl From<&str> for RawDomainType {
    fn from(value: &str) -> Self {
        RawDomainType::Name(value.to_string())
    }
}

impl From<String> for RawDomainType {
    fn from(value: String) -> Self {
        RawDomainType::Name(value)
    }
}

impl From<Value> for RawDomainType {
    fn from(value: Value) -> Self {
        RawDomainType::Json(value)
    }
}

/// Resolve a raw type tag into a `DomainType`.
///
/// Strings are looked up by member name. Anything else that is not already a
/// member is rejected with [`DomainError::InvalidDomainType`], naming the
/// offending value and its runtime type.
pub fn resolve_domain_type(raw: impl Into<RawDomainType>) -> Result<DomainType> {
    match raw.into() {
        RawDomainType::Member(domain_type) => Ok(domain_type),
        RawDomainType::Name(name) | RawDomainType::Json(Value::String(name)) => {
            DomainType::from_name(&name).ok_or_else(|| invalid_domain_type(name, "string"))
        }
        RawDomainType::Json(other) => {
            let kind = json::json_kind(&other);
            Err(invalid_domain_type(other.to_string(), kind))
        }
    }
}

fn invalid_domain_type(value: String, kind: &'static str) -> DomainError {
    debug!(value = %value, kind, "rejected domain type");
    DomainError::InvalidDomainType { value, kind }
}

/// Inferred nature of the values within a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticDomainType {
    Numeric,
    Text,
    Logic,
    Datetime,
    Binary,
    Currency,
    ValueSet,
    Identifier,
    Miscellaneous,
    /// Unable to determine.
    Unknown,
}

impl SemanticDomainType {
    /// Every member, in declaration order.
    pub const ALL: [SemanticDomainType; 10] = [
        SemanticDomainType::Numeric,
        SemanticDomainType::Text,
        SemanticDomainType::Logic,
        SemanticDomainType::Datetime,
        SemanticDomainType::Binary,
        SemanticDomainType::Currency,
        SemanticDomainType::ValueSet,
        SemanticDomainType::Identifier,
        SemanticDomainType::Miscellaneous,
        SemanticDomainType::Unknown,
    ];

    /// Member name, e.g. `VALUE_SET`.
    pub fn name(&self) -> &'static str {
        match self {
            SemanticDomainType::Numeric => "NUMERIC",
            SemanticDomainType::Text => "TEXT",
            SemanticDomainType::Logic => "LOGIC",
            SemanticDomainType::Datetime => "DATETIME",
            SemanticDomainType::Binary => "BINARY",
            SemanticDomainType::Currency => "CURRENCY",
            SemanticDomainType::ValueSet => "VALUE_SET",
            SemanticDomainType::Identifier => "IDENTIFIER",
            SemanticDomainType::Miscellaneous => "MISCELLANEOUS",
            SemanticDomainType::Unknown => "UNKNOWN",
        }
    }

    /// Projected value, e.g. `value_set`.
    pub fn value(&self) -> &'static str {
        match self {
            SemanticDomainType::Numeric => "numeric",
            SemanticDomainType::Text => "text",
            SemanticDomainType::Logic => "logic",
            SemanticDomainType::Datetime => "datetime",
            SemanticDomainType::Binary => "binary",
            SemanticDomainType::Currency => "currency",
            SemanticDomainType::ValueSet => "value_set",
            SemanticDomainType::Identifier => "identifier",
            SemanticDomainType::Miscellaneous => "miscellaneous",
            SemanticDomainType::Unknown => "unknown",
        }
    }
}

impl Default for SemanticDomainType {
    fn default() -> Self {
        SemanticDomainType::Unknown
    }
}

impl fmt::Display for SemanticDomainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for SemanticDomainType {
    type Err = DomainError;

    /// Accepts either the member name (`VALUE_SET`) or its value (`value_set`).
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s || t.value() == s)
            .ok_or_else(|| DomainError::InvalidSemanticType(s.to_string()))
    }
}

/// A semantic type paired with free-form supporting details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InferredSemanticDomainType {
    semantic_domain_type: Option<SemanticDomainType>,
    details: Option<Map<String, Value>>,
}

impl InferredSemanticDomainType {
    /// Create a new annotation.
    pub fn new(
        semantic_domain_type: Option<SemanticDomainType>,
        details: Option<Map<String, Value>>,
    ) -> Self {
        Self {
            semantic_domain_type,
            details,
        }
    }

    /// Create an annotation from a semantic type name or value.
    pub fn from_name(name: &str, details: Option<Map<String, Value>>) -> Result<Self> {
        Ok(Self::new(Some(name.parse()?), details))
    }

    pub fn semantic_domain_type(&self) -> Option<SemanticDomainType> {
        self.semantic_domain_type
    }

    pub fn details(&self) -> Option<&Map<String, Value>> {
        self.details.as_ref()
    }

    /// Plain mapping of both fields; absent fields are kept as `null`.
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        dict.insert(
            "semantic_domain_type".to_string(),
            self.semantic_domain_type
                .map_or(Value::Null, |t| Value::String(t.value().to_string())),
        );
        dict.insert(
            "details".to_string(),
            self.details.clone().map_or(Value::Null, Value::Object),
        );
        dict
    }
}

impl ToJsonDict for InferredSemanticDomainType {
    fn to_json_dict(&self) -> Map<String, Value> {
        match json::sort_keys(Value::Object(self.to_dict())) {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

/// A semantic-type-bearing value stored in a domain's `details`.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailValue {
    Semantic(SemanticDomainType),
    Inferred(InferredSemanticDomainType),
}

impl DetailValue {
    pub fn semantic_domain_type(&self) -> Option<SemanticDomainType> {
        match self {
            DetailValue::Semantic(t) => Some(*t),
            DetailValue::Inferred(inferred) => inferred.semantic_domain_type(),
        }
    }

    /// The semantic type's string value, or `null` when there is none.
    pub fn value(&self) -> Value {
        self.semantic_domain_type()
            .map_or(Value::Null, |t| Value::String(t.value().to_string()))
    }

    /// Parse a detail from its projected form.
    ///
    /// Strings are read as semantic type names or values; objects are read
    /// as inferred annotations.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(DetailValue::Semantic(s.parse()?)),
            Value::Object(_) => Ok(DetailValue::Inferred(serde_json::from_value(value.clone())?)),
            other => Err(DomainError::InvalidSemanticType(format!(
                "expected a string or mapping, got {} {}",
                json::json_kind(other),
                other
            ))),
        }
    }
}

impl From<SemanticDomainType> for DetailValue {
    fn from(value: SemanticDomainType) -> Self {
        DetailValue::Semantic(value)
    }
}

impl From<InferredSemanticDomainType> for DetailValue {
    fn from(value: InferredSemanticDomainType) -> Self {
        DetailValue::Inferred(value)
    }
}
