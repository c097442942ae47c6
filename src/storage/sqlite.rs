//! SQLite storage implementation

use std::path::{Path, PathBuf};
use rusqlite::Connection;
use crate::{Result, StatementContext};
use crate::paths;
use super::schema;

/// Handle on one ftags store.
///
/// Constructed once per invocation and borrowed by every registry, manager
/// and query engine; it is the only owner of the connection.
pub struct TagStore {
    conn: Connection,
    path: Option<PathBuf>,
    root: PathBuf,
    created: bool,
}

impl TagStore {
    /// Open a store file, creating it and its schema if it does not exist yet
    pub fn open(path: &Path) -> Result<Self> {
        let path = if path.is_absolute() {
            paths::normalize(path)
        } else {
            paths::absolutize(path, &std::env::current_dir()?)
        };

        // SQLite treats a zero-length file as an empty database
        let existed = std::fs::metadata(&path).map(|m| m.len() > 0).unwrap_or(false);
        if !existed {
            ensure_parent_dir(&path)?;
        }

        let conn = Connection::open(&path)?;
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));

        let store = Self {
            conn,
            path: Some(path),
            root,
            created: !existed,
        };
        if store.created {
            store.ensure_schema()?;
        }
        Ok(store)
    }

    /// Open an in-memory store rooted at the working directory (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        Self::open_in_memory_at(&root)
    }

    /// Open an in-memory store whose file keys are relative to `root`
    pub fn open_in_memory_at(root: &Path) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn,
            path: None,
            root: paths::normalize(root),
            created: true,
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Create the tables. Safe to run any number of times.
    ///
    /// Statements run one after another on the single connection, each
    /// completing before the next is issued.
    pub fn ensure_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, []).with_sql(stmt)?;
        }
        Ok(())
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Location of the store file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Directory that stored file paths are relative to
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether this open created the store (and its schema)
    pub fn was_created(&self) -> bool {
        self.created
    }

    /// Normalized store key for a filesystem path.
    ///
    /// Relative paths are taken relative to the store root.
    pub fn file_key(&self, path: &Path) -> String {
        let absolute = paths::absolutize(path, &self.root);
        paths::to_key(&paths::relative_to(&self.root, &absolute))
    }

    /// Filesystem location of a stored file key
    pub fn resolve_key(&self, key: &str) -> PathBuf {
        paths::absolutize(Path::new(key), &self.root)
    }
}

fn ensure_parent_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
