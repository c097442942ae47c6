//! File <-> tag association
//!
//! Assigning is additive and idempotent: a file keeps the tags it already
//! had, and re-asserting an existing pair is silently skipped. There is no
//! rollback; a failure part-way may leave some pairs written, so callers
//! treat `assign` as at-least-once.

use rusqlite::params_from_iter;
use crate::{Error, Result, StatementContext};
use crate::model::{File, Tag};
use crate::registry::{distinct_names, FileRegistry, TagRegistry};
use crate::storage::TagStore;

/// Pairs per INSERT, well under SQLite's bound-parameter limit
const MAX_PAIRS_PER_STATEMENT: usize = 500;

/// Sole writer of `file_tag` rows
pub struct AssociationManager<'a> {
    store: &'a TagStore,
}

impl<'a> AssociationManager<'a> {
    pub fn new(store: &'a TagStore) -> Self {
        Self { store }
    }

    /// Attach `names` to the file at store key `path`, creating the file and
    /// any unknown tags on the way.
    ///
    /// Returns the file with its complete tag list, old tags included.
    pub fn assign<S: AsRef<str>>(&self, path: &str, names: &[S]) -> Result<File> {
        if distinct_names(names).is_empty() {
            return Err(Error::Validation("at least one tag name is required".to_string()));
        }

        let tags = TagRegistry::new(self.store).get_or_create(names)?;
        let files = FileRegistry::new(self.store);
        let file = files.get_or_create(path)?;

        self.link(file.id, &tags)?;

        files.reload_tags(file)
    }

    /// Bulk insert-or-ignore one row per (file, tag) pair
    fn link(&self, file_id: i64, tags: &[Tag]) -> Result<()> {
        for chunk in tags.chunks(MAX_PAIRS_PER_STATEMENT) {
            let values = vec!["(?, ?)"; chunk.len()].join(", ");
            let sql = format!("INSERT OR IGNORE INTO file_tag (file_id, tag_id) VALUES {values}");

            let params = chunk.iter().flat_map(|tag| [file_id, tag.id]);
            self.store
                .conn()
                .execute(&sql, params_from_iter(params))
                .with_sql(&sql)?;
        }
        Ok(())
    }
}
