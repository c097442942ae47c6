//! File identities keyed by normalized, store-relative path

use rusqlite::OptionalExtension;
use crate::{Error, Result, StatementContext};
use crate::model::File;
use crate::query::QueryEngine;
use crate::storage::TagStore;

const SELECT_FILE_BY_PATH: &str = "SELECT id, path, description FROM file WHERE path = ?1";

const SELECT_FILE_BY_ID: &str = "SELECT id, path, description FROM file WHERE id = ?1";

// Atomic get-or-create: the no-op update makes RETURNING yield the existing
// row on conflict instead of nothing.
const UPSERT_FILE: &str = r#"
INSERT INTO file (path) VALUES (?1)
ON CONFLICT(path) DO UPDATE SET path = excluded.path
RETURNING id, path, description
"#;

/// Maps store keys (see [`TagStore::file_key`]) to stable file identities
pub struct FileRegistry<'a> {
    store: &'a TagStore,
}

impl<'a> FileRegistry<'a> {
    pub fn new(store: &'a TagStore) -> Self {
        Self { store }
    }

    /// Look up a file without creating it. `Ok(None)` when unknown.
    pub fn get(&self, path: &str) -> Result<Option<File>> {
        let file = self
            .store
            .conn()
            .query_row(SELECT_FILE_BY_PATH, [path], File::from_row)
            .optional()
            .with_sql(SELECT_FILE_BY_PATH)?;

        file.map(|f| self.reload_tags(f)).transpose()
    }

    /// Look up a file by id
    pub fn get_by_id(&self, id: i64) -> Result<Option<File>> {
        let file = self
            .store
            .conn()
            .query_row(SELECT_FILE_BY_ID, [id], File::from_row)
            .optional()
            .with_sql(SELECT_FILE_BY_ID)?;

        file.map(|f| self.reload_tags(f)).transpose()
    }

    /// Look up a file, registering it on first reference.
    ///
    /// The same path always yields the same id.
    pub fn get_or_create(&self, path: &str) -> Result<File> {
        if path.is_empty() {
            return Err(Error::Validation("file path must not be empty".to_string()));
        }

        let file = self
            .store
            .conn()
            .query_row(UPSERT_FILE, [path], File::from_row)
            .with_sql(UPSERT_FILE)?;

        self.reload_tags(file)
    }

    /// Replace the file's tag list with what the store holds now
    pub(crate) fn reload_tags(&self, mut file: File) -> Result<File> {
        file.tags = QueryEngine::new(self.store).file_tags(file.id)?;
        Ok(file)
    }
}
