//! Detail-page resolution
//!
//! A work's detail page carries the author name in a fixed cell of the
//! author-data table and the archive download link in the download table.
//! Resolution is best-effort: fetch or parse trouble yields empty fields and
//! the caller filters the candidate out, it never aborts the run.

use crate::crawler::fetcher::fetch_text;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// Second cell of the second row of the author-data table holds the name
const AUTHOR_CELL_SELECTOR: &str = "table[summary='作家データ'] tr:nth-child(2) td:nth-child(2)";

/// All anchors in the download-links table are archive candidates
const DOWNLOAD_ANCHOR_SELECTOR: &str = "table.download a";

/// An href is an archive candidate iff it ends with this extension
const ARCHIVE_EXTENSION: &str = ".zip";

/// Author name and resolved archive URL extracted from a detail page
///
/// Either field may be empty when the corresponding structure is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailPage {
    pub author: String,
    pub zip_url: String,
}

/// Fetches and parses a detail page.
///
/// Any fetch failure or non-success status returns empty values; an empty
/// `zip_url` is how the caller learns there is nothing to download.
pub async fn resolve_detail(client: &Client, page_url: &str) -> DetailPage {
    let html = match fetch_text(client, page_url).await {
        Ok(html) => html,
        Err(e) => {
            tracing::debug!("detail page {} unavailable: {}", page_url, e);
            return DetailPage::default();
        }
    };

    parse_detail(&html, page_url)
}

/// Parses a detail page into author and archive URL.
///
/// Among anchors in the download table whose href ends in `.zip`, the *last*
/// one in document order wins. Note the archive-entry scan keeps the first
/// match; the two directions are separate contracts.
pub fn parse_detail(html: &str, page_url: &str) -> DetailPage {
    let document = Html::parse_document(html);

    let author = Selector::parse(AUTHOR_CELL_SELECTOR)
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|cell| cell.text().collect::<String>())
        })
        .unwrap_or_default();

    let mut zip_href = String::new();
    if let Ok(selector) = Selector::parse(DOWNLOAD_ANCHOR_SELECTOR) {
        for anchor in document.select(&selector) {
            if let Some(href) = anchor.value().attr("href") {
                if href.ends_with(ARCHIVE_EXTENSION) {
                    // Last match wins
                    zip_href = href.to_string();
                }
            }
        }
    }

    if zip_href.is_empty() {
        return DetailPage {
            author,
            zip_url: String::new(),
        };
    }

    DetailPage {
        zip_url: resolve_archive_url(page_url, &zip_href),
        author,
    }
}

/// Resolves an archive href against the detail page URL.
///
/// Absolute hrefs pass through unchanged; relative ones resolve against the
/// page's directory with standard URL join semantics (`./`, `../`, plain
/// names). Resolution failure yields an empty string, filtered upstream.
fn resolve_archive_url(page_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    match Url::parse(page_url).and_then(|base| base.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => String::new(),
    }
}
