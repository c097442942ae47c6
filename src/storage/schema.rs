//! Database schema definitions
//!
//! Table and column names match stores written by earlier ftags releases,
//! so an existing `.ftags.db` opens without migration.

/// SQL to create the file table
pub const CREATE_FILE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS file (
    id INTEGER PRIMARY KEY,
    path TEXT UNIQUE,
    description TEXT
)
"#;

/// SQL to create the tag table (`tag` holds the tag name)
pub const CREATE_TAG_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tag (
    id INTEGER PRIMARY KEY,
    tag TEXT UNIQUE
)
"#;

/// SQL to create the file <-> tag association table
pub const CREATE_FILE_TAG_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS file_tag (
    file_id INTEGER,
    tag_id INTEGER,
    PRIMARY KEY(file_id, tag_id)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_file_tag_tag ON file_tag(tag_id)",
];

/// All schema creation statements, in execution order
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_FILE_TABLE,
        CREATE_TAG_TABLE,
        CREATE_FILE_TAG_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
