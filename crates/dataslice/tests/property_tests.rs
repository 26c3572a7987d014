//! Property-based tests for domain canonicalization and identity.
//!
//! These tests use proptest to generate random kwargs and verify that
//! canonicalization, equality and identifiers keep their invariants.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p dataslice --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p dataslice --test property_tests
//! ```

use proptest::prelude::*;
use serde_json::{Map, Value};

use dataslice::{Domain, DomainKwargs, DomainType, ParamValue};

// =============================================================================
// Test Strategies
// =============================================================================

/// Short keys, so that collisions and overwrites happen.
fn key() -> impl Strategy<Value = String> {
    "[a-e]{1,3}"
}

/// Leaf values, including every empty-equivalent scalar.
fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(Value::String(String::new())),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::from),
        "[a-z]{1,8}".prop_map(Value::String),
    ]
}

/// Nested JSON values with empty containers mixed in.
fn nested_value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec((key(), inner), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn kwargs_map() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::vec((key(), nested_value()), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

fn domain_type() -> impl Strategy<Value = DomainType> {
    prop::sample::select(DomainType::ALL.to_vec())
}

fn contains_empty(value: &ParamValue) -> bool {
    match value {
        ParamValue::Map(kwargs) => kwargs
            .iter()
            .any(|(_, v)| v.is_empty() || contains_empty(v)),
        ParamValue::List(items) => items.iter().any(|v| v.is_empty() || contains_empty(v)),
        _ => false,
    }
}

// =============================================================================
// Canonicalization Properties
// =============================================================================

proptest! {
    /// Canonicalizing twice gives the same result as canonicalizing once.
    #[test]
    fn canonicalize_is_idempotent(map in kwargs_map()) {
        let once = DomainKwargs::from(map).canonicalize();
        let twice = once.clone().canonicalize();
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.is_canonical());
    }

    /// No empty value survives at any depth.
    #[test]
    fn canonical_kwargs_have_no_empty_values(map in kwargs_map()) {
        let canonical = DomainKwargs::from(map).canonicalize();
        prop_assert!(!contains_empty(&ParamValue::Map(canonical)));
    }

    /// The in-place variant agrees with the pure one.
    #[test]
    fn in_place_matches_pure(map in kwargs_map()) {
        let raw = DomainKwargs::from(map);
        let mut in_place = raw.clone();
        in_place.canonicalize_in_place();
        prop_assert_eq!(in_place, raw.canonicalize());
    }
}

// =============================================================================
// Identity Properties
// =============================================================================

proptest! {
    /// Two domains built from the same input share projection, text and id.
    #[test]
    fn identity_is_deterministic(t in domain_type(), map in kwargs_map()) {
        let a = Domain::new(t, Some(DomainKwargs::from(map.clone())), None).unwrap();
        let b = Domain::new(t, Some(DomainKwargs::from(map)), None).unwrap();

        prop_assert_eq!(a.to_json_dict(), b.to_json_dict());
        prop_assert_eq!(a.to_string(), b.to_string());
        prop_assert_eq!(a.id(), b.id());
        prop_assert!(a == b);
    }

    /// Reversing key insertion order changes nothing observable.
    #[test]
    fn key_order_is_irrelevant(t in domain_type(), map in kwargs_map()) {
        let reversed: Map<String, Value> = map
            .iter()
            .rev()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let a = Domain::new(t, Some(DomainKwargs::from(map)), None).unwrap();
        let b = Domain::new(t, Some(DomainKwargs::from(reversed)), None).unwrap();

        prop_assert_eq!(a.to_string(), b.to_string());
        prop_assert_eq!(a.id(), b.id());
    }

    /// A domain rebuilt from its projection equals the original.
    #[test]
    fn projection_round_trip(t in domain_type(), map in kwargs_map()) {
        let domain = Domain::new(t, Some(DomainKwargs::from(map)), None).unwrap();
        let rebuilt = Domain::from_json_dict(&domain.to_json_dict()).unwrap();

        prop_assert!(rebuilt == domain);
        prop_assert_eq!(rebuilt.id(), domain.id());
    }

    /// A domain equals its own raw projection used as a mapping.
    #[test]
    fn domain_equals_its_projection(t in domain_type(), map in kwargs_map()) {
        let domain = Domain::new(t, Some(DomainKwargs::from(map)), None).unwrap();
        let projection = domain.to_json_dict();
        prop_assert!(domain == projection);
    }

    /// Adding a non-empty kwarg under a fresh key changes the id.
    #[test]
    fn extra_kwarg_changes_id(t in domain_type(), map in kwargs_map(), value in "[a-z]{1,8}") {
        let domain = Domain::new(t, Some(DomainKwargs::from(map)), None).unwrap();
        let mut extended = domain.clone();
        extended.set_kwarg("zz_extra", value);

        prop_assert_ne!(domain.id(), extended.id());
        prop_assert!(domain != extended);
    }
}
