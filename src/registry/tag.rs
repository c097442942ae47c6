//! Tag identities and usage counts

use rusqlite::params_from_iter;
use crate::{Error, Result, StatementContext};
use crate::model::Tag;
use crate::storage::TagStore;
use super::{distinct_names, placeholders, MAX_IN_LIST};

const INSERT_TAG: &str = "INSERT OR IGNORE INTO tag (tag) VALUES (?1)";

/// Maps tag names to stable tag identities
pub struct TagRegistry<'a> {
    store: &'a TagStore,
}

impl<'a> TagRegistry<'a> {
    pub fn new(store: &'a TagStore) -> Self {
        Self { store }
    }

    /// Resolve names to tags, creating the ones that do not exist yet.
    ///
    /// Duplicate and already-known names are accepted silently.
    pub fn get_or_create<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Tag>> {
        let names = distinct_names(names);
        if names.is_empty() {
            return Err(Error::Validation("at least one tag name is required".to_string()));
        }
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(Error::Validation("tag names must not be empty or whitespace-only".to_string()));
        }

        let mut stmt = self.store.conn().prepare_cached(INSERT_TAG).with_sql(INSERT_TAG)?;
        for name in &names {
            stmt.execute([name]).with_sql(INSERT_TAG)?;
        }

        self.select(&names)
    }

    /// Look up existing tags by name. Unknown names match nothing; an empty
    /// name list returns every tag.
    pub fn get<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Tag>> {
        self.select(&distinct_names(names))
    }

    /// Every tag in the store, most used first
    pub fn all(&self) -> Result<Vec<Tag>> {
        self.select(&[])
    }

    /// Tags with their file counts, ordered by count descending.
    ///
    /// Ties are broken by name so listings are stable. Long name lists are
    /// looked up in chunks and merged.
    fn select(&self, names: &[&str]) -> Result<Vec<Tag>> {
        if names.len() <= MAX_IN_LIST {
            return self.select_chunk(names);
        }

        let mut tags = Vec::with_capacity(names.len());
        for chunk in names.chunks(MAX_IN_LIST) {
            tags.extend(self.select_chunk(chunk)?);
        }
        // Same order as the SQL: uses DESC, then name in BINARY collation
        tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        Ok(tags)
    }

    fn select_chunk(&self, names: &[&str]) -> Result<Vec<Tag>> {
        let filter = if names.is_empty() {
            String::new()
        } else {
            format!("WHERE t.tag IN ({})", placeholders(names.len()))
        };
        let sql = format!(
            r#"
            SELECT t.id, t.tag, COUNT(ft.file_id) AS uses
            FROM tag t
            LEFT JOIN file_tag ft ON ft.tag_id = t.id
            {filter}
            GROUP BY t.id, t.tag
            ORDER BY uses DESC, t.tag ASC
            "#
        );

        let mut stmt = self.store.conn().prepare(&sql).with_sql(&sql)?;
        let tags = stmt
            .query_map(params_from_iter(names.iter()), Tag::from_row)
            .with_sql(&sql)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .with_sql(&sql)?;

        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::association::AssociationManager;

    fn tag_rows(store: &TagStore) -> i64 {
        store
            .conn()
            .query_row("SELECT COUNT(*) FROM tag", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let store = TagStore::open_in_memory().unwrap();
        let registry = TagRegistry::new(&store);

        let first = registry.get_or_create(&["rust", "cli", "rust"]).unwrap();
        let second = registry.get_or_create(&["cli", "rust"]).unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(tag_rows(&store), 2);

        let mut first_ids: Vec<i64> = first.iter().map(|t| t.id).collect();
        let mut second_ids: Vec<i64> = second.iter().map(|t| t.id).collect();
        first_ids.sort();
        second_ids.sort();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let store = TagStore::open_in_memory().unwrap();
        let tags = TagRegistry::new(&store).get_or_create(&["Work", "work"]).unwrap();
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_get_does_not_create() {
        let store = TagStore::open_in_memory().unwrap();
        let registry = TagRegistry::new(&store);

        registry.get_or_create(&["known"]).unwrap();
        let found = registry.get(&["known", "unknown"]).unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "known");
        assert_eq!(tag_rows(&store), 1);
    }

    #[test]
    fn test_empty_names_rejected_when_creating() {
        let store = TagStore::open_in_memory().unwrap();
        let registry = TagRegistry::new(&store);

        let empty: [&str; 0] = [];
        assert!(matches!(registry.get_or_create(&empty), Err(Error::Validation(_))));
        match registry.get_or_create(&["ok", " "]) {
            Err(Error::Validation(msg)) => assert!(msg.contains("whitespace-only")),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(tag_rows(&store), 0);
    }

    #[test]
    fn test_listing_orders_by_usage() {
        let store = TagStore::open_in_memory().unwrap();
        let assoc = AssociationManager::new(&store);

        assoc.assign("a.txt", &["popular", "middle"]).unwrap();
        assoc.assign("b.txt", &["popular", "middle"]).unwrap();
        assoc.assign("c.txt", &["popular"]).unwrap();
        TagRegistry::new(&store).get_or_create(&["idle"]).unwrap();

        let all = TagRegistry::new(&store).all().unwrap();
        let listing: Vec<(&str, u64)> = all.iter().map(|t| (t.name.as_str(), t.count)).collect();

        assert_eq!(listing, vec![("popular", 3), ("middle", 2), ("idle", 0)]);
        assert!(all.last().unwrap().is_unused());
    }

    #[test]
    fn test_get_with_empty_names_lists_everything() {
        let store = TagStore::open_in_memory().unwrap();
        let registry = TagRegistry::new(&store);
        registry.get_or_create(&["x", "y", "z"]).unwrap();

        let empty: [&str; 0] = [];
        assert_eq!(registry.get(&empty).unwrap().len(), 3);
    }

    #[test]
    fn test_long_name_lists_are_chunked() {
        let store = TagStore::open_in_memory().unwrap();
        let registry = TagRegistry::new(&store);

        let mut names: Vec<String> = (0..40_000).map(|i| format!("tag{i:05}")).collect();
        let created = registry.get_or_create(&names).unwrap();
        assert_eq!(created.len(), names.len());
        assert_eq!(tag_rows(&store), 40_000);

        // A tag from a late chunk still sorts first once it is used
        AssociationManager::new(&store).assign("hot.txt", &["tag39999"]).unwrap();
        names.push("missing".to_string());
        let found = registry.get(&names).unwrap();

        assert_eq!(found.len(), 40_000);
        assert_eq!(found[0].name, "tag39999");
        assert_eq!(found[0].count, 1);
        assert_eq!(found[1].name, "tag00000");
        assert_eq!(found.last().unwrap().name, "tag39998");
    }
}
