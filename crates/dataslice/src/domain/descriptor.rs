//! Domain construction, projection and textual form.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{DomainError, Result};
use crate::identity::{CanonicalBytes, IdDict};
use crate::json::{self, filter_properties, FilterConfig, ToJsonDict};
use crate::kwargs::{canonicalize_value, DomainKwargs, ParamValue};
use crate::types::{resolve_domain_type, DetailValue, DomainType, RawDomainType};

/// Semantic details attached to a domain, keyed by name.
pub type Details = IndexMap<String, DetailValue>;

/// Top-level fields of a domain's JSON form.
const FIELDS: [&str; 3] = ["domain_type", "domain_kwargs", "details"];

/// A named slice of a dataset, usable as a stable key.
///
/// `domain_kwargs` is always canonical. `details` is stored as given and is
/// not pruned, so an explicit `unknown` annotation survives.
///
/// # Example
///
/// ```
/// use dataslice::{Domain, DomainKwargs, DomainType};
///
/// let domain = Domain::new(
///     "COLUMN",
///     Some(DomainKwargs::new().with("column", "age").with("unused", "")),
///     None,
/// )
/// .unwrap();
///
/// assert_eq!(domain.domain_type(), DomainType::Column);
/// assert_eq!(domain, Domain::column("age"));
/// assert_eq!(domain.id().len(), 64);
/// ```
#[derive(Debug, Clone)]
pub struct Domain {
    domain_type: DomainType,
    domain_kwargs: DomainKwargs,
    details: Details,
}

impl Domain {
    /// Create a domain.
    ///
    /// `domain_type` may be a [`DomainType`], a member name such as
    /// `"COLUMN"`, or a JSON value. Resolving it is the only fallible step.
    pub fn new(
        domain_type: impl Into<RawDomainType>,
        domain_kwargs: Option<DomainKwargs>,
        details: Option<Details>,
    ) -> Result<Self> {
        let domain_type = resolve_domain_type(domain_type)?;
        Ok(Self::from_parts(
            domain_type,
            domain_kwargs.unwrap_or_default(),
            details.unwrap_or_default(),
        ))
    }

    /// Create a domain whose kwargs are given as a JSON value.
    ///
    /// Fails with [`DomainError::MalformedKwargs`] unless `domain_kwargs` is
    /// an object (or `null`, meaning no kwargs).
    pub fn from_kwargs_value(domain_type: impl Into<RawDomainType>, domain_kwargs: Value) -> Result<Self> {
        let domain_type = resolve_domain_type(domain_type)?;
        let domain_kwargs = match domain_kwargs {
            Value::Null => DomainKwargs::new(),
            other => DomainKwargs::try_from(other)?,
        };
        Ok(Self::from_parts(domain_type, domain_kwargs, Details::new()))
    }

    /// Rebuild a domain from its JSON projection (or any mapping shaped like one).
    ///
    /// The type may be given by value (`"column"`) or by name (`"COLUMN"`).
    /// Keys other than `domain_type`, `domain_kwargs` and `details` are
    /// rejected with [`DomainError::MalformedKwargs`].
    pub fn from_json_dict(dict: &Map<String, Value>) -> Result<Self> {
        if let Some(unknown) = dict.keys().find(|key| !FIELDS.contains(&key.as_str())) {
            debug!(key = %unknown, "rejected unknown domain field");
            return Err(DomainError::MalformedKwargs(format!(
                "unexpected field \"{unknown}\", expected one of {}",
                FIELDS.join(", ")
            )));
        }

        let domain_type = match dict.get("domain_type") {
            Some(Value::String(s)) => match DomainType::from_value(s) {
                Some(domain_type) => domain_type,
                None => resolve_domain_type(s.as_str())?,
            },
            Some(other) => resolve_domain_type(other.clone())?,
            None => resolve_domain_type(Value::Null)?,
        };

        let domain_kwargs = match dict.get("domain_kwargs") {
            None | Some(Value::Null) => DomainKwargs::new(),
            Some(value) => DomainKwargs::try_from(value.clone())?,
        };

        let details = match dict.get("details") {
            None | Some(Value::Null) => Details::new(),
            Some(Value::Object(map)) => map
                .iter()
                .map(|(key, value)| Ok((key.clone(), DetailValue::from_json(value)?)))
                .collect::<Result<Details>>()?,
            Some(other) => {
                return Err(DomainError::MalformedKwargs(format!(
                    "details must be a mapping, got {} {}",
                    json::json_kind(other),
                    other
                )));
            }
        };

        Ok(Self::from_parts(domain_type, domain_kwargs, details))
    }

    /// A column domain for `column`.
    pub fn column(column: impl Into<String>) -> Self {
        let column: String = column.into();
        Self::from_parts(
            DomainType::Column,
            DomainKwargs::new().with("column", column),
            Details::new(),
        )
    }

    /// A domain covering the whole table.
    pub fn table() -> Self {
        Self::from_parts(DomainType::Table, DomainKwargs::new(), Details::new())
    }

    pub(crate) fn from_parts(domain_type: DomainType, domain_kwargs: DomainKwargs, details: Details) -> Self {
        let domain_kwargs = domain_kwargs.canonicalize();
        debug!(
            domain_type = %domain_type,
            kwargs = domain_kwargs.len(),
            details = details.len(),
            "constructed domain"
        );
        Self {
            domain_type,
            domain_kwargs,
            details,
        }
    }

    pub fn domain_type(&self) -> DomainType {
        self.domain_type
    }

    pub fn domain_kwargs(&self) -> &DomainKwargs {
        &self.domain_kwargs
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    /// Look up a single kwarg.
    pub fn kwarg(&self, key: &str) -> Option<&ParamValue> {
        self.domain_kwargs.get(key)
    }

    /// Set a kwarg, canonicalizing the value first.
    ///
    /// A value that canonicalizes to empty removes the key instead.
    pub fn set_kwarg(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = canonicalize_value(value.into());
        if value.is_empty() {
            self.domain_kwargs.remove(&key);
        } else {
            self.domain_kwargs.insert(key, value);
        }
    }

    pub fn remove_kwarg(&mut self, key: &str) -> Option<ParamValue> {
        self.domain_kwargs.remove(key)
    }

    pub fn set_detail(&mut self, key: impl Into<String>, value: impl Into<DetailValue>) {
        self.details.insert(key.into(), value.into());
    }

    pub fn remove_detail(&mut self, key: &str) -> Option<DetailValue> {
        self.details.shift_remove(key)
    }

    /// JSON projection: type value, JSON-safe kwargs and semantic details,
    /// with empty entries filtered out.
    pub fn to_json_dict(&self) -> Map<String, Value> {
        let details: Map<String, Value> = self
            .details
            .iter()
            .map(|(key, value)| (key.clone(), value.value()))
            .collect();

        let mut dict = Map::new();
        dict.insert(
            "domain_type".to_string(),
            Value::String(self.domain_type.value().to_string()),
        );
        dict.insert(
            "domain_kwargs".to_string(),
            Value::Object(self.domain_kwargs.to_json_dict()),
        );
        dict.insert("details".to_string(), Value::Object(details));

        filter_properties(&dict, &FilterConfig::canonical())
    }

    /// Deterministic identifier derived from the JSON projection.
    ///
    /// Recomputed on every call.
    pub fn id(&self) -> String {
        IdDict::from(self.to_json_dict()).to_id()
    }
}

impl ToJsonDict for Domain {
    fn to_json_dict(&self) -> Map<String, Value> {
        Domain::to_json_dict(self)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&json::render(&Value::Object(self.to_json_dict())))
    }
}

impl Hash for Domain {
    fn hash<H: Hasher>(&self, state: &mut H) {
        CanonicalBytes::new(&Value::Object(self.to_json_dict())).hash(state);
    }
}

impl Serialize for Domain {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json_dict().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Domain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let dict = Map::deserialize(deserializer)?;
        Domain::from_json_dict(&dict).map_err(serde::de::Error::custom)
    }
}
