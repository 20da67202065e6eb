//! Storage for collected works
//!
//! Holds the persisted corpus: authors, contents, and the full-text index
//! over segmented content. Schema creation is idempotent and happens on
//! every open.

mod schema;
mod sqlite;

pub use schema::{initialize_schema, SCHEMA_SQL};
pub use sqlite::Storage;

/// One row of the authors relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRow {
    pub author_id: String,
    pub author: String,
}

/// One title of an author, from the contents relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleRow {
    pub title_id: String,
    pub title: String,
}

/// One result row of a full-text query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub author_id: String,
    pub author: String,
    pub title_id: String,
    pub title: String,
}
