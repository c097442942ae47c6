//! Entities tracked by the store

use serde::{Deserialize, Serialize};
use std::fmt;

/// A filesystem path known to the store.
///
/// `path` is relative to the directory holding the store file, so a store
/// copied along with the tree it describes keeps working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub id: i64,
    pub path: String,
    pub description: Option<String>,
    /// Every tag currently associated with the file
    pub tags: Vec<Tag>,
}

impl File {
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    pub(crate) fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(File {
            id: row.get(0)?,
            path: row.get(1)?,
            description: row.get(2)?,
            tags: Vec::new(),
        })
    }
}

/// A user-chosen label. Names are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    /// Number of files carrying this tag at read time
    pub count: u64,
}

impl Tag {
    pub fn is_unused(&self) -> bool {
        self.count == 0
    }

    pub(crate) fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        let count: i64 = row.get(2)?;
        Ok(Tag {
            id: row.get(0)?,
            name: row.get(1)?,
            count: count.max(0) as u64,
        })
    }
}

/// Row counts per table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub files: usize,
    pub tags: usize,
    pub associations: usize,
}

impl fmt::Display for StoreStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Store Statistics:")?;
        writeln!(f, "  Files: {}", self.files)?;
        writeln!(f, "  Tags: {}", self.tags)?;
        writeln!(f, "  Associations: {}", self.associations)
    }
}
