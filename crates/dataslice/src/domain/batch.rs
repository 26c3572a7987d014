//! Building domains in bulk.

use super::descriptor::Domain;

/// Build one column domain per column name.
pub fn build_domains_from_column_names<S: AsRef<str>>(column_names: &[S]) -> Vec<Domain> {
    column_names
        .iter()
        .map(|name| Domain::column(name.as_ref()))
        .collect()
}
