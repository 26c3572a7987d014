//! Domain keyword parameters and their canonical form.

mod canonical;
mod value;

pub use canonical::{canonicalize, canonicalize_value, DomainKwargs};
pub use value::ParamValue;
