//! Integration tests for storage and query translation
//!
//! These run against file-backed databases to cover the persisted-corpus
//! contract: schema creation on open, survival across reopen, numeric
//! identifier ordering, and the query round trip.

use bunko::crawler::Entity;
use bunko::query;
use bunko::segmenter;
use bunko::storage::Storage;
use tempfile::TempDir;

fn entity(author_id: &str, title_id: &str, author: &str, title: &str) -> Entity {
    Entity {
        author_id: author_id.to_string(),
        author: author.to_string(),
        title_id: title_id.to_string(),
        title: title.to_string(),
        page_url: format!(
            "https://www.aozora.gr.jp/cards/{}/card{}.html",
            author_id, title_id
        ),
        zip_url: format!(
            "https://www.aozora.gr.jp/cards/{}/files/{}.zip",
            author_id, title_id
        ),
    }
}

#[test]
fn test_corpus_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("bunko.sqlite");

    {
        let storage = Storage::open(&db_path).unwrap();
        let content = "走れメロス。メロスは激怒した。";
        let words = segmenter::segment_to_words(content);
        storage
            .add_entry(&entity("35", "1567", "太宰治", "走れメロス"), content, &words)
            .unwrap();
    }

    let storage = Storage::open(&db_path).unwrap();
    assert_eq!(
        storage.get_content("35", "1567").unwrap().as_deref(),
        Some("走れメロス。メロスは激怒した。")
    );

    let hits = query::search(&storage, "走れメロス。メロスは激怒した。").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].author, "太宰治");
}

#[test]
fn test_author_listing_orders_numerically() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::open(&dir.path().join("bunko.sqlite")).unwrap();

    for id in ["2", "10", "1"] {
        storage
            .add_entry(&entity(id, "1", &format!("author-{}", id), "t"), "c", "c")
            .unwrap();
    }

    let ids: Vec<String> = storage
        .list_authors()
        .unwrap()
        .into_iter()
        .map(|a| a.author_id)
        .collect();
    // Numeric order, not lexicographic ("1", "10", "2")
    assert_eq!(ids, vec!["1", "2", "10"]);
}

#[test]
fn test_match_expression_reaches_index_verbatim() {
    let storage = Storage::open_in_memory().unwrap();

    // Stored words use pre-delimited ASCII tokens; the query segments to
    // exactly those tokens joined by single spaces
    storage
        .add_entry(&entity("1", "1", "a", "t"), "abc def", "abc def")
        .unwrap();

    assert_eq!(query::build_match_expression("abc def"), "abc def");
    let hits = query::search(&storage, "abc def").unwrap();
    assert_eq!(hits.len(), 1);

    // A term absent from the words column must not match
    assert!(query::search(&storage, "xyz").unwrap().is_empty());
}

#[test]
fn test_query_over_multiple_works() {
    let storage = Storage::open_in_memory().unwrap();

    let works = [
        ("879", "127", "芥川龍之介", "羅生門", "ある日の暮方の事である"),
        ("879", "92", "芥川龍之介", "蜘蛛の糸", "御釈迦様は極楽の蓮池のふちを"),
        ("1095", "42618", "坂口安吾", "堕落論", "半年のうちに世相は変った"),
    ];
    for (author_id, title_id, author, title, content) in works {
        let words = segmenter::segment_to_words(content);
        storage
            .add_entry(&entity(author_id, title_id, author, title), content, &words)
            .unwrap();
    }

    // Full-content queries round-trip through the same segmenter
    let hits = query::search(&storage, "ある日の暮方の事である").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "羅生門");

    let hits = query::search(&storage, "半年のうちに世相は変った").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].author_id, "1095");

    // Authors listing spans both, numerically ordered
    let authors = storage.list_authors().unwrap();
    assert_eq!(authors.len(), 2);
    assert_eq!(authors[0].author_id, "879");
    assert_eq!(authors[1].author_id, "1095");

    // Title listing is scoped to the author
    let titles = storage.list_titles("879").unwrap();
    assert_eq!(titles.len(), 2);
    assert_eq!(titles[0].title_id, "92");
    assert_eq!(titles[1].title_id, "127");
}
