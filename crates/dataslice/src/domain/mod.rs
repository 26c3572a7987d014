//! The domain descriptor: a type tag, canonical kwargs and semantic details.

mod batch;
mod descriptor;
mod equality;

pub use batch::build_domains_from_column_names;
pub use descriptor::{Details, Domain};
pub use equality::{Comparand, EqualityStrategy};
