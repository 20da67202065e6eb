//! SQLite storage handle
//!
//! One connection, opened once and passed by reference to every operation.
//! The collector writes through [`Storage::add_entry`]; the search side only
//! reads.

use crate::crawler::Entity;
use crate::storage::schema::initialize_schema;
use crate::storage::{AuthorRow, SearchHit, TitleRow};
use crate::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Storage backend over a single SQLite connection
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens (or creates) the database at `path` and ensures the schema
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Creates an in-memory database, mainly for tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Persists one extracted work: author row, content row, and the FTS row
    /// at the content row's identity.
    ///
    /// Re-collecting the same work replaces all three rows.
    pub fn add_entry(&self, entry: &Entity, content: &str, words: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO authors (author_id, author) VALUES (?1, ?2)",
            params![entry.author_id, entry.author],
        )?;

        // REPLACE assigns a fresh rowid, so drop any stale FTS row first
        let old_rowid: Option<i64> = self
            .conn
            .query_row(
                "SELECT rowid FROM contents WHERE author_id = ?1 AND title_id = ?2",
                params![entry.author_id, entry.title_id],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(old_rowid) = old_rowid {
            self.conn.execute(
                "DELETE FROM contents_fts WHERE docid = ?1",
                params![old_rowid],
            )?;
        }

        self.conn.execute(
            "INSERT OR REPLACE INTO contents (author_id, title_id, title, content)
             VALUES (?1, ?2, ?3, ?4)",
            params![entry.author_id, entry.title_id, entry.title, content],
        )?;

        let rowid: i64 = self.conn.query_row(
            "SELECT rowid FROM contents WHERE author_id = ?1 AND title_id = ?2",
            params![entry.author_id, entry.title_id],
            |row| row.get(0),
        )?;

        self.conn.execute(
            "INSERT OR REPLACE INTO contents_fts (docid, words) VALUES (?1, ?2)",
            params![rowid, words],
        )?;

        Ok(())
    }

    /// Lists all authors, ordered by the numeric value of the author ID
    pub fn list_authors(&self) -> Result<Vec<AuthorRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.author_id, a.author FROM authors a
             ORDER BY CAST(a.author_id AS INTEGER)",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(AuthorRow {
                    author_id: row.get(0)?,
                    author: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    /// Lists one author's titles, ordered by the numeric value of the title ID
    pub fn list_titles(&self, author_id: &str) -> Result<Vec<TitleRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.title_id, c.title FROM contents c
             WHERE c.author_id = ?1
             ORDER BY CAST(c.title_id AS INTEGER)",
        )?;

        let rows = stmt
            .query_map(params![author_id], |row| {
                Ok(TitleRow {
                    title_id: row.get(0)?,
                    title: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    /// Returns one work's full text, or None if the work is not stored
    pub fn get_content(&self, author_id: &str, title_id: &str) -> Result<Option<String>> {
        let content = self
            .conn
            .query_row(
                "SELECT c.content FROM contents c
                 WHERE c.author_id = ?1 AND c.title_id = ?2",
                params![author_id, title_id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(content)
    }

    /// Runs a full-text match joined against the metadata relations.
    ///
    /// The match expression goes to the FTS `MATCH` operator verbatim;
    /// space-separated terms get the operator's native AND semantics.
    pub fn search(&self, match_expr: &str) -> Result<Vec<SearchHit>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.author_id, a.author, c.title_id, c.title
             FROM contents c
             INNER JOIN authors a
                 ON a.author_id = c.author_id
             INNER JOIN contents_fts f
                 ON c.rowid = f.docid
                 AND f.words MATCH ?1",
        )?;

        let rows = stmt
            .query_map(params![match_expr], |row| {
                Ok(SearchHit {
                    author_id: row.get(0)?,
                    author: row.get(1)?,
                    title_id: row.get(2)?,
                    title: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(author_id: &str, title_id: &str, author: &str, title: &str) -> Entity {
        Entity {
            author_id: author_id.to_string(),
            author: author.to_string(),
            title_id: title_id.to_string(),
            title: title.to_string(),
            page_url: format!("https://host/cards/{}/card{}.html", author_id, title_id),
            zip_url: format!("https://host/cards/{}/{}.zip", author_id, title_id),
        }
    }

    #[test]
    fn test_add_and_get_content() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .add_entry(&entity("1", "2", "著者", "題"), "本文", "本文")
            .unwrap();

        assert_eq!(storage.get_content("1", "2").unwrap().as_deref(), Some("本文"));
        assert_eq!(storage.get_content("1", "999").unwrap(), None);
    }

    #[test]
    fn test_authors_ordered_numerically() {
        let storage = Storage::open_in_memory().unwrap();
        for id in ["2", "10", "1"] {
            storage
                .add_entry(&entity(id, "1", &format!("author {}", id), "t"), "c", "c")
                .unwrap();
        }

        let ids: Vec<String> = storage
            .list_authors()
            .unwrap()
            .into_iter()
            .map(|a| a.author_id)
            .collect();
        assert_eq!(ids, vec!["1", "2", "10"]);
    }

    #[test]
    fn test_titles_ordered_numerically() {
        let storage = Storage::open_in_memory().unwrap();
        for id in ["3", "20", "1"] {
            storage
                .add_entry(&entity("1", id, "a", &format!("title {}", id)), "c", "c")
                .unwrap();
        }

        let ids: Vec<String> = storage
            .list_titles("1")
            .unwrap()
            .into_iter()
            .map(|t| t.title_id)
            .collect();
        assert_eq!(ids, vec!["1", "3", "20"]);
    }

    #[test]
    fn test_titles_filtered_by_author() {
        let storage = Storage::open_in_memory().unwrap();
        storage.add_entry(&entity("1", "1", "a", "mine"), "c", "c").unwrap();
        storage.add_entry(&entity("2", "2", "b", "other"), "c", "c").unwrap();

        let titles = storage.list_titles("1").unwrap();
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].title, "mine");
    }

    #[test]
    fn test_search_matches_words() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .add_entry(&entity("1", "2", "夏目漱石", "吾輩は猫である"), "raw", "吾輩 は 猫 で ある")
            .unwrap();
        storage
            .add_entry(&entity("1", "3", "夏目漱石", "坊っちゃん"), "raw", "親譲り の 無鉄砲")
            .unwrap();

        let hits = storage.search("猫").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "吾輩は猫である");
        assert_eq!(hits[0].author, "夏目漱石");
    }

    #[test]
    fn test_search_multiple_terms_is_and() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .add_entry(&entity("1", "2", "a", "both"), "raw", "猫 犬")
            .unwrap();
        storage
            .add_entry(&entity("1", "3", "a", "cat only"), "raw", "猫")
            .unwrap();

        let hits = storage.search("猫 犬").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "both");
    }

    #[test]
    fn test_recollect_replaces_fts_row() {
        let storage = Storage::open_in_memory().unwrap();
        let e = entity("1", "2", "a", "t");
        storage.add_entry(&e, "old", "古い").unwrap();
        storage.add_entry(&e, "new", "新しい").unwrap();

        assert!(storage.search("古い").unwrap().is_empty());
        assert_eq!(storage.search("新しい").unwrap().len(), 1);
        assert_eq!(storage.get_content("1", "2").unwrap().as_deref(), Some("new"));
    }
}
