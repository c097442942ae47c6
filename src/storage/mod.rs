//! Storage Layer - SQLite-backed persistence
//!
//! One store file with three tables:
//! - file(id, path, description)
//! - tag(id, tag)
//! - file_tag(file_id, tag_id)

pub mod schema;
pub mod sqlite;

pub use sqlite::TagStore;
