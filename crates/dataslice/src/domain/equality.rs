//! Equality between domains and other representations of a domain.
//!
//! A domain equals another value when any of these holds, tried in order:
//!
//! 1. **Projection**: the other value exposes a JSON projection
//!    ([`ToJsonDict`]) equal to this domain's projection.
//! 2. **Filtered mapping**: the other value is a plain mapping that equals
//!    this domain's projection once empty entries are filtered out of it.
//! 3. **Textual**: the textual forms of both values are identical.
//!
//! An absent value never matches.

use serde_json::{Map, Value};

use super::descriptor::Domain;
use crate::json::{filter_properties, render, FilterConfig, ToJsonDict};
use crate::types::InferredSemanticDomainType;

/// The comparison that established equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EqualityStrategy {
    Projection,
    FilteredMapping,
    Textual,
}

/// Something a domain can be compared with.
#[derive(Clone, Copy)]
pub enum Comparand<'a> {
    /// No value at all.
    Absent,
    /// Any value exposing a JSON projection.
    Projectable(&'a dyn ToJsonDict),
    /// A plain (possibly unfiltered) mapping, e.g. loaded from storage.
    Mapping(&'a Map<String, Value>),
    /// An arbitrary JSON value; objects compare as mappings.
    Json(&'a Value),
    /// A textual form.
    Text(&'a str),
}

impl<'a> Comparand<'a> {
    fn is_absent(&self) -> bool {
        matches!(self, Comparand::Absent | Comparand::Json(Value::Null))
    }

    fn projection(&self) -> Option<Map<String, Value>> {
        match self {
            Comparand::Projectable(other) => Some(other.to_json_dict()),
            _ => None,
        }
    }

    fn mapping(&self) -> Option<&'a Map<String, Value>> {
        match *self {
            Comparand::Mapping(map) => Some(map),
            Comparand::Json(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    fn text(&self) -> Option<String> {
        match *self {
            Comparand::Absent => None,
            Comparand::Projectable(other) => Some(render(&Value::Object(other.to_json_dict()))),
            Comparand::Mapping(map) => Some(render(&Value::Object(map.clone()))),
            Comparand::Json(Value::String(s)) => Some(s.clone()),
            Comparand::Text(s) => Some(s.to_string()),
            Comparand::Json(value) => Some(render(value)),
        }
    }
}

impl Domain {
    /// Return the first strategy under which `other` equals this domain.
    ///
    /// Projections are compared as JSON values, so numbers keep their kind:
    /// `1` does not equal `1.0` and `true` does not equal `1`. This keeps
    /// equality consistent with [`Hash`] and with [`Domain::id`].
    pub fn matched_by<'a>(&self, other: impl Into<Comparand<'a>>) -> Option<EqualityStrategy> {
        let other = other.into();
        if other.is_absent() {
            return None;
        }

        let projection = self.to_json_dict();

        if other.projection().is_some_and(|p| p == projection) {
            return Some(EqualityStrategy::Projection);
        }

        if let Some(map) = other.mapping() {
            if filter_properties(map, &FilterConfig::canonical()) == projection {
                return Some(EqualityStrategy::FilteredMapping);
            }
        }

        let text = render(&Value::Object(projection));
        if other.text().is_some_and(|t| t == text) {
            return Some(EqualityStrategy::Textual);
        }

        None
    }

    /// Returns true if `other` equals this domain under any strategy.
    pub fn equals<'a>(&self, other: impl Into<Comparand<'a>>) -> bool {
        self.matched_by(other).is_some()
    }
}

impl<'a> From<&'a Domain> for Comparand<'a> {
    fn from(value: &'a Domain) -> Self {
        Comparand::Projectable(value)
    }
}

impl<'a> From<Option<&'a Domain>> for Comparand<'a> {
    fn from(value: Option<&'a Domain>) -> Self {
        value.map_or(Comparand::Absent, Comparand::from)
    }
}

impl<'a> From<&'a InferredSemanticDomainType> for Comparand<'a> {
    fn from(value: &'a InferredSemanticDomainType) -> Self {
        Comparand::Projectable(value)
    }
}

impl<'a> From<&'a Map<String, Value>> for Comparand<'a> {
    fn from(value: &'a Map<String, Value>) -> Self {
        Comparand::Mapping(value)
    }
}

impl<'a> From<&'a Value> for Comparand<'a> {
    fn from(value: &'a Value) -> Self {
        Comparand::Json(value)
    }
}

impl<'a> From<&'a str> for Comparand<'a> {
    fn from(value: &'a str) -> Self {
        Comparand::Text(value)
    }
}

impl<'a> From<&'a String> for Comparand<'a> {
    fn from(value: &'a String) -> Self {
        Comparand::Text(value)
    }
}

impl PartialEq for Domain {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Domain {}

impl PartialEq<Map<String, Value>> for Domain {
    fn eq(&self, other: &Map<String, Value>) -> bool {
        self.equals(other)
    }
}

impl PartialEq<Value> for Domain {
    fn eq(&self, other: &Value) -> bool {
        self.equals(other)
    }
}

impl PartialEq<str> for Domain {
    fn eq(&self, other: &str) -> bool {
        self.equals(other)
    }
}

impl PartialEq<&str> for Domain {
    fn eq(&self, other: &&str) -> bool {
        self.equals(*other)
    }
}

impl PartialEq<String> for Domain {
    fn eq(&self, other: &String) -> bool {
        self.equals(other)
    }
}

impl PartialEq<Domain> for Map<String, Value> {
    fn eq(&self, other: &Domain) -> bool {
        other.equals(self)
    }
}

impl PartialEq<Domain> for Value {
    fn eq(&self, other: &Domain) -> bool {
        other.equals(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DomainType, SemanticDomainType};
    use crate::kwargs::DomainKwargs;
    use serde_json::json;

    #[test]
    fn test_domains_match_by_projection() {
        let a = Domain::column("age");
        let b = Domain::column("age");
        assert_eq!(a.matched_by(&b), Some(EqualityStrategy::Projection));
        assert_ne!(a, Domain::column("height"));
    }

    #[test]
    fn test_mapping_is_filtered_before_comparison() {
        let domain = Domain::column("age");
        let stored = json!({
            "domain_type": "column",
            "domain_kwargs": {"column": "age", "row_condition": null},
            "details": {}
        });
        assert_eq!(
            domain.matched_by(stored.as_object().unwrap()),
            Some(EqualityStrategy::FilteredMapping)
        );
        assert_eq!(domain, stored);
        assert_eq!(stored, domain);
    }

    #[test]
    fn test_mapping_with_different_content_is_unequal() {
        let domain = Domain::column("age");
        let stored = json!({"domain_type": "column", "domain_kwargs": {"column": "height"}});
        assert_ne!(domain, stored);
    }

    #[test]
    fn test_textual_fallback() {
        let domain = Domain::column("age");
        let text = domain.to_string();
        assert_eq!(domain.matched_by(text.as_str()), Some(EqualityStrategy::Textual));
        assert_eq!(domain, text);
        assert_eq!(domain, json!(text));
        assert_ne!(domain, "column age");
    }

    #[test]
    fn test_absent_never_matches() {
        let domain = Domain::table();
        assert!(!domain.equals(Comparand::Absent));
        assert!(!domain.equals(None::<&Domain>));
        assert_ne!(domain, Value::Null);
    }

    #[test]
    fn test_other_projectables_compare_by_projection() {
        let annotation = crate::types::InferredSemanticDomainType::new(Some(SemanticDomainType::Numeric), None);
        assert!(!Domain::table().equals(&annotation));
    }

    #[test]
    fn test_key_order_does_not_matter() {
        let a = Domain::new(
            DomainType::ColumnPair,
            Some(DomainKwargs::new().with("column_A", "x").with("column_B", "y")),
            None,
        )
        .unwrap();
        let b = Domain::new(
            DomainType::ColumnPair,
            Some(DomainKwargs::new().with("column_B", "y").with("column_A", "x")),
            None,
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_numbers_keep_their_kind() {
        let domain = Domain::new(DomainType::Column, Some(DomainKwargs::new().with("column", "a").with("n", 1i64)), None).unwrap();
        let stored = json!({"domain_type": "column", "domain_kwargs": {"column": "a", "n": 1.0}});
        assert_ne!(domain, stored);

        let flag = Domain::new(DomainType::Column, Some(DomainKwargs::new().with("column", "a").with("n", true)), None).unwrap();
        assert_ne!(domain, flag);
        assert_ne!(domain.id(), flag.id());
    }
}
