//! Dataslice: canonical domain descriptors for tabular datasets.
//!
//! A [`Domain`] names a slice of a dataset (a column, a column pair, the
//! whole table) together with keyword parameters and semantic details. It is
//! used as a stable key for addressing and caching results computed about
//! that slice.
//!
//! # Core Principles
//!
//! - **Canonical**: kwargs are pruned of empty values at every depth
//! - **Comparable**: domains equal other domains, stored mappings, and their
//!   own textual form
//! - **Addressable**: every domain has a deterministic SHA-256 identifier
//!
//! # Example
//!
//! ```
//! use dataslice::{build_domains_from_column_names, Domain, DomainType};
//! use serde_json::json;
//!
//! let domain = Domain::from_kwargs_value(
//!     "COLUMN",
//!     json!({"column": "age", "row_condition": {}}),
//! )
//! .unwrap();
//!
//! assert_eq!(domain.domain_type(), DomainType::Column);
//! assert_eq!(domain, json!({"domain_type": "column", "domain_kwargs": {"column": "age"}}));
//!
//! let domains = build_domains_from_column_names(&["age", "height"]);
//! assert_eq!(domains[0].id(), domain.id());
//! ```

pub mod domain;
pub mod error;
pub mod identity;
pub mod json;
pub mod kwargs;
pub mod types;

pub use domain::{build_domains_from_column_names, Comparand, Details, Domain, EqualityStrategy};
pub use error::{DomainError, Result};
pub use identity::{sha256_hex, CanonicalBytes, IdDict};
pub use json::{filter_properties, FilterConfig, ToJsonDict};
pub use kwargs::{canonicalize, canonicalize_value, DomainKwargs, ParamValue};
pub use types::{
    resolve_domain_type, DetailValue, DomainType, InferredSemanticDomainType, RawDomainType,
    SemanticDomainType,
};
