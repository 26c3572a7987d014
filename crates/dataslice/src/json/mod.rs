//! JSON projection helpers: JSON-safe conversion and falsy-property filtering.

mod convert;
mod filter;

pub use convert::{json_kind, render, sort_keys, to_json_safe};
pub use filter::{filter_properties, filter_value, FilterConfig};

use serde_json::{Map, Value};

/// A value that can project itself into a plain JSON mapping.
pub trait ToJsonDict {
    /// Project into a plain mapping of JSON-native values.
    fn to_json_dict(&self) -> Map<String, Value>;
}
