//! Get-or-create registries for the two identity tables
//!
//! `FileRegistry` is the only writer of `file` rows and `TagRegistry` the
//! only writer of `tag` rows. Both rely on the UNIQUE constraints so that a
//! redundant insert is a no-op rather than an error.

use std::collections::HashSet;

pub mod file;
pub mod tag;

pub use file::FileRegistry;
pub use tag::TagRegistry;

/// Values bound per `IN (...)` list, well under SQLite's bound-parameter limit
pub(crate) const MAX_IN_LIST: usize = 500;

/// Deduplicate names, keeping first-seen order
pub(crate) fn distinct_names<S: AsRef<str>>(names: &[S]) -> Vec<&str> {
    let mut seen = HashSet::with_capacity(names.len());
    names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| seen.insert(*name))
        .collect()
}

/// `?, ?, ?` with `n` placeholders
pub(crate) fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}
