//! # ftags - tag files, find them again by tag
//!
//! ftags keeps a many-to-many map between filesystem paths and free-form
//! tags in a small SQLite file (`.ftags.db`). The store is discovered by
//! walking up from the working directory, so a store created in a project
//! root serves every subdirectory.
//!
//! ftags provides:
//! - Store discovery and schema bootstrap
//! - Get-or-create registries for files and tags
//! - Idempotent file/tag association
//! - Tag queries with popularity ranking

pub mod association;
pub mod config;
pub mod locator;
pub mod model;
pub mod paths;
pub mod query;
pub mod registry;
pub mod storage;
pub mod ui;

// Re-exports for convenient access
pub use association::AssociationManager;
pub use locator::{StoreLocation, LocateMode, STORE_FILE_NAME};
pub use model::{File, StoreStats, Tag};
pub use query::{MatchMode, QueryEngine};
pub use registry::{FileRegistry, TagRegistry};
pub use storage::TagStore;

/// Result type alias for ftags operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ftags operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {source}{}", display_sql(.sql))]
    Storage {
        #[source]
        source: rusqlite::Error,
        sql: Option<String>,
    },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(source: rusqlite::Error) -> Self {
        Error::Storage { source, sql: None }
    }
}

impl Error {
    /// The SQL statement that failed, if one was recorded
    pub fn sql(&self) -> Option<&str> {
        match self {
            Error::Storage { sql, .. } => sql.as_deref(),
            _ => None,
        }
    }
}

fn display_sql(sql: &Option<String>) -> String {
    match sql {
        Some(sql) => format!("\n  statement: {}", sql.trim()),
        None => String::new(),
    }
}

/// Attach the failing statement to a storage result
pub trait StatementContext<T> {
    fn with_sql(self, sql: &str) -> Result<T>;
}

impl<T> StatementContext<T> for rusqlite::Result<T> {
    fn with_sql(self, sql: &str) -> Result<T> {
        self.map_err(|source| Error::Storage {
            source,
            sql: Some(sql.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_shows_statement() {
        let store = TagStore::open_in_memory().unwrap();
        let sql = "SELECT nope FROM nowhere";
        let err = store.conn().execute(sql, []).with_sql(sql).unwrap_err();

        assert_eq!(err.sql(), Some(sql));
        assert!(err.to_string().contains("statement: SELECT nope FROM nowhere"));
    }

    #[test]
    fn test_plain_storage_error_has_no_statement() {
        let err: Error = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(err.sql().is_none());
        assert!(!err.to_string().contains("statement"));
    }
}
