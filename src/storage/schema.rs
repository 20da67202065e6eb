//! Database schema definitions
//!
//! Three relations: one row per author, one row per work, and an FTS4
//! virtual table holding each work's whitespace-joined word stream. The FTS
//! table is keyed to `contents` by row identity (`docid` = `contents.rowid`).

use rusqlite::Connection;

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS authors (
    author_id TEXT,
    author TEXT,
    PRIMARY KEY (author_id)
);

CREATE TABLE IF NOT EXISTS contents (
    author_id TEXT,
    title_id TEXT,
    title TEXT,
    content TEXT,
    PRIMARY KEY (author_id, title_id)
);

CREATE VIRTUAL TABLE IF NOT EXISTS contents_fts USING fts4(words);
"#;

/// Creates all tables if they do not exist; safe to run on every open
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
