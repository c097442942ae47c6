//! Query engine implementation
//!
//! Provides the read side of the store:
//! - Files by tag name (any-of or all-of)
//! - Tags of a single file
//! - Row statistics

use std::collections::HashMap;
use rusqlite::params_from_iter;
use serde::{Deserialize, Serialize};
use crate::{Error, Result, StatementContext};
use crate::model::{File, StoreStats, Tag};
use crate::registry::{distinct_names, placeholders, FileRegistry, TagRegistry, MAX_IN_LIST};
use crate::storage::TagStore;

/// How a multi-tag query combines its tags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Files carrying at least one of the tags (union)
    #[default]
    Any,
    /// Files carrying every one of the tags (intersection)
    All,
}

const SELECT_FILE_TAGS: &str = r#"
SELECT t.id, t.tag, (SELECT COUNT(*) FROM file_tag c WHERE c.tag_id = t.id) AS uses
FROM tag t
JOIN file_tag ft ON ft.tag_id = t.id
WHERE ft.file_id = ?1
ORDER BY t.tag
"#;

/// Query engine over a tag store
pub struct QueryEngine<'a> {
    store: &'a TagStore,
}

impl<'a> QueryEngine<'a> {
    /// Create a new query engine
    pub fn new(store: &'a TagStore) -> Self {
        Self { store }
    }

    /// Files associated with any of `names`
    pub fn files_by_tags<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<File>> {
        self.files_by_tags_with(names, MatchMode::Any)
    }

    /// Files matching `names` under the given mode, ordered by path.
    ///
    /// Unknown tag names match nothing and never create tags. Every returned
    /// file carries its full tag list, not just the tags that matched.
    pub fn files_by_tags_with<S: AsRef<str>>(&self, names: &[S], mode: MatchMode) -> Result<Vec<File>> {
        let names = distinct_names(names);
        if names.is_empty() {
            return Err(Error::Validation("at least one tag name is required".to_string()));
        }

        let tags = TagRegistry::new(self.store).get(&names)?;
        if tags.is_empty() {
            return Ok(Vec::new());
        }
        // An unknown tag can never be satisfied
        if mode == MatchMode::All && tags.len() < names.len() {
            return Ok(Vec::new());
        }

        // Tag-id chunks are disjoint, so per-chunk hit counts add up per file
        let required = match mode {
            MatchMode::Any => 1,
            MatchMode::All => tags.len(),
        };
        let mut hits: HashMap<i64, usize> = HashMap::new();
        for chunk in tags.chunks(MAX_IN_LIST) {
            let sql = format!(
                "SELECT file_id, COUNT(DISTINCT tag_id) FROM file_tag WHERE tag_id IN ({}) GROUP BY file_id",
                placeholders(chunk.len())
            );
            let mut stmt = self.store.conn().prepare(&sql).with_sql(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(chunk.iter().map(|t| t.id)), |row| {
                    Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
                })
                .with_sql(&sql)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .with_sql(&sql)?;

            for (file_id, count) in rows {
                *hits.entry(file_id).or_default() += count as usize;
            }
        }

        let ids: Vec<i64> = hits
            .into_iter()
            .filter(|(_, count)| *count >= required)
            .map(|(id, _)| id)
            .collect();

        let mut files = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_IN_LIST) {
            let sql = format!(
                "SELECT id, path, description FROM file WHERE id IN ({})",
                placeholders(chunk.len())
            );
            let mut stmt = self.store.conn().prepare(&sql).with_sql(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(chunk), File::from_row)
                .with_sql(&sql)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .with_sql(&sql)?;
            files.extend(rows);
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));

        let registry = FileRegistry::new(self.store);
        files.into_iter().map(|f| registry.reload_tags(f)).collect()
    }

    /// Tags of one file with their store-wide usage counts, ordered by name
    pub fn file_tags(&self, file_id: i64) -> Result<Vec<Tag>> {
        let mut stmt = self
            .store
            .conn()
            .prepare_cached(SELECT_FILE_TAGS)
            .with_sql(SELECT_FILE_TAGS)?;

        let tags = stmt
            .query_map([file_id], Tag::from_row)
            .with_sql(SELECT_FILE_TAGS)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .with_sql(SELECT_FILE_TAGS)?;

        Ok(tags)
    }

    /// Row counts for each table
    pub fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            files: self.count("SELECT COUNT(*) FROM file")?,
            tags: self.count("SELECT COUNT(*) FROM tag")?,
            associations: self.count("SELECT COUNT(*) FROM file_tag")?,
        })
    }

    fn count(&self, sql: &str) -> Result<usize> {
        let count: i64 = self
            .store
            .conn()
            .query_row(sql, [], |row| row.get(0))
            .with_sql(sql)?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::association::AssociationManager;

    fn paths(files: &[File]) -> Vec<&str> {
        files.iter().map(|f| f.path.as_str()).collect()
    }

    fn sample_store() -> TagStore {
        let store = TagStore::open_in_memory().unwrap();
        let assoc = AssociationManager::new(&store);
        assoc.assign("p1.txt", &["a"]).unwrap();
        assoc.assign("p2.txt", &["b"]).unwrap();
        assoc.assign("p3.txt", &["a", "b", "c"]).unwrap();
        store
    }

    #[test]
    fn test_single_tag_query() {
        let store = TagStore::open_in_memory().unwrap();
        let assoc = AssociationManager::new(&store);
        assoc.assign("p1", &["a"]).unwrap();
        assoc.assign("p2", &["b"]).unwrap();

        let engine = QueryEngine::new(&store);
        assert_eq!(paths(&engine.files_by_tags(&["a"]).unwrap()), vec!["p1"]);
        assert_eq!(paths(&engine.files_by_tags(&["a", "b"]).unwrap()), vec!["p1", "p2"]);
    }

    #[test]
    fn test_any_is_union() {
        let store = sample_store();
        let files = QueryEngine::new(&store).files_by_tags(&["a", "b"]).unwrap();
        assert_eq!(paths(&files), vec!["p1.txt", "p2.txt", "p3.txt"]);
    }

    #[test]
    fn test_all_is_intersection() {
        let store = sample_store();
        let engine = QueryEngine::new(&store);

        let files = engine.files_by_tags_with(&["a", "b"], MatchMode::All).unwrap();
        assert_eq!(paths(&files), vec!["p3.txt"]);

        let files = engine.files_by_tags_with(&["a", "missing"], MatchMode::All).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_results_carry_full_tag_list() {
        let store = sample_store();
        let files = QueryEngine::new(&store).files_by_tags(&["c"]).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].tag_names(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unknown_tags_match_nothing() {
        let store = sample_store();
        let engine = QueryEngine::new(&store);

        assert!(engine.files_by_tags(&["nope"]).unwrap().is_empty());
        assert_eq!(engine.stats().unwrap().tags, 3);
    }

    #[test]
    fn test_empty_query_rejected() {
        let store = sample_store();
        let empty: [&str; 0] = [];
        let result = QueryEngine::new(&store).files_by_tags(&empty);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_file_tags_report_global_counts() {
        let store = sample_store();
        let p3 = FileRegistry::new(&store).get("p3.txt").unwrap().unwrap();

        let tags = QueryEngine::new(&store).file_tags(p3.id).unwrap();
        let counts: Vec<(&str, u64)> = tags.iter().map(|t| (t.name.as_str(), t.count)).collect();
        assert_eq!(counts, vec![("a", 2), ("b", 2), ("c", 1)]);
    }

    #[test]
    fn test_stats() {
        let store = sample_store();
        let stats = QueryEngine::new(&store).stats().unwrap();
        assert_eq!(stats, StoreStats { files: 3, tags: 3, associations: 5 });
    }

    #[test]
    fn test_queries_beyond_parameter_limit() {
        let store = TagStore::open_in_memory().unwrap();
        let names: Vec<String> = (0..40_000).map(|i| format!("n{i}")).collect();

        let engine = QueryEngine::new(&store);
        assert!(engine.files_by_tags(&names).unwrap().is_empty());

        let assoc = AssociationManager::new(&store);
        assoc.assign("every.txt", &names).unwrap();
        assoc.assign("first.txt", &["n0"]).unwrap();
        assoc.assign("last.txt", &["n39999"]).unwrap();

        let any = engine.files_by_tags(&names).unwrap();
        assert_eq!(paths(&any), vec!["every.txt", "first.txt", "last.txt"]);
        assert_eq!(any[0].tags.len(), 40_000);

        let all = engine.files_by_tags_with(&names, MatchMode::All).unwrap();
        assert_eq!(paths(&all), vec!["every.txt"]);
    }
}
