//! Deep removal of empty-equivalent properties from JSON mappings.

use serde_json::{Map, Value};
use tracing::trace;

/// Configuration for property filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    /// Remove `null` values.
    pub clean_nulls: bool,

    /// Remove empty strings, arrays, and objects.
    pub clean_falsy: bool,

    /// Keep `0`, `0.0`, and `false` even though they are falsy.
    pub keep_falsy_numerics: bool,

    /// Only keep these top-level keys (None = keep all).
    pub include_keys: Option<Vec<String>>,

    /// Always drop these top-level keys.
    pub exclude_keys: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            clean_nulls: true,
            clean_falsy: true,
            keep_falsy_numerics: true,
            include_keys: None,
            exclude_keys: Vec::new(),
        }
    }
}

impl FilterConfig {
    /// Create the default filter configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rules applied to every domain projection.
    pub fn canonical() -> Self {
        Self::default()
    }

    /// Set whether `null` values are removed.
    pub fn with_clean_nulls(mut self, clean: bool) -> Self {
        self.clean_nulls = clean;
        self
    }

    /// Set whether empty strings and containers are removed.
    pub fn with_clean_falsy(mut self, clean: bool) -> Self {
        self.clean_falsy = clean;
        self
    }

    /// Set whether falsy numerics survive filtering.
    pub fn with_keep_falsy_numerics(mut self, keep: bool) -> Self {
        self.keep_falsy_numerics = keep;
        self
    }

    /// Restrict the top level to the given keys.
    pub fn with_include_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Drop the given keys from the top level.
    pub fn with_exclude_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    fn is_removable(&self, value: &Value) -> bool {
        match value {
            Value::Null => self.clean_nulls,
            Value::String(s) => self.clean_falsy && s.is_empty(),
            Value::Array(items) => self.clean_falsy && items.is_empty(),
            Value::Object(map) => self.clean_falsy && map.is_empty(),
            Value::Bool(b) => !self.keep_falsy_numerics && !b,
            Value::Number(n) => !self.keep_falsy_numerics && n.as_f64() == Some(0.0),
        }
    }

    fn keeps_key(&self, key: &str) -> bool {
        let included = self
            .include_keys
            .as_ref()
            .is_none_or(|keys| keys.iter().any(|k| k == key));
        included && !self.exclude_keys.iter().any(|k| k == key)
    }
}

/// Return a copy of `properties` with empty-equivalent entries removed.
///
/// Filtering is bottom-up: nested objects and arrays are filtered first, so a
/// child that empties out also removes its parent entry. Key selection only
/// applies at the top level.
pub fn filter_properties(properties: &Map<String, Value>, config: &FilterConfig) -> Map<String, Value> {
    properties
        .iter()
        .filter(|(key, _)| config.keeps_key(key))
        .filter_map(|(key, value)| keep_filtered(key, value, config))
        .collect()
}

/// Filter a single value, descending into objects and arrays.
pub fn filter_value(value: &Value, config: &FilterConfig) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter_map(|(key, value)| keep_filtered(key, value, config))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| filter_value(item, config))
                .filter(|item| !config.is_removable(item))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn keep_filtered(key: &str, value: &Value, config: &FilterConfig) -> Option<(String, Value)> {
    let filtered = filter_value(value, config);
    if config.is_removable(&filtered) {
        trace!(key, "pruned empty property");
        None
    } else {
        Some((key.to_string(), filtered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_removes_empty_values() {
        let props = object(json!({"a": 1, "b": null, "c": "", "d": [], "e": {}}));
        let filtered = filter_properties(&props, &FilterConfig::canonical());
        assert_eq!(Value::Object(filtered), json!({"a": 1}));
    }

    #[test]
    fn test_pruning_cascades_to_parent() {
        let props = object(json!({"column": "a", "meta": {"x": null, "y": {"z": []}}}));
        let filtered = filter_properties(&props, &FilterConfig::canonical());
        assert_eq!(Value::Object(filtered), json!({"column": "a"}));
    }

    #[test]
    fn test_keeps_falsy_numerics_by_default() {
        let props = object(json!({"zero": 0, "off": false, "half": 0.0}));
        let filtered = filter_properties(&props, &FilterConfig::canonical());
        assert_eq!(filtered.len(), 3);

        let strict = FilterConfig::new().with_keep_falsy_numerics(false);
        assert!(filter_properties(&props, &strict).is_empty());
    }

    #[test]
    fn test_filters_array_elements() {
        let props = object(json!({"values": [1, null, "", {"a": null}, "x"]}));
        let filtered = filter_properties(&props, &FilterConfig::canonical());
        assert_eq!(Value::Object(filtered), json!({"values": [1, "x"]}));
    }

    #[test]
    fn test_clean_nulls_only() {
        let props = object(json!({"a": null, "b": "", "c": {}}));
        let config = FilterConfig::new().with_clean_falsy(false);
        let filtered = filter_properties(&props, &config);
        assert_eq!(Value::Object(filtered), json!({"b": "", "c": {}}));
    }

    #[test]
    fn test_include_and_exclude_keys() {
        let props = object(json!({"a": 1, "b": 2, "c": 3}));

        let config = FilterConfig::new().with_include_keys(["a", "b"]);
        assert_eq!(Value::Object(filter_properties(&props, &config)), json!({"a": 1, "b": 2}));

        let config = FilterConfig::new().with_exclude_keys(["a"]);
        assert_eq!(Value::Object(filter_properties(&props, &config)), json!({"b": 2, "c": 3}));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let props = object(json!({"a": null}));
        let _ = filter_properties(&props, &FilterConfig::canonical());
        assert_eq!(props.len(), 1);
    }
}
