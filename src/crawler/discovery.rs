//! Listing-page discovery
//!
//! A per-author listing page carries its works as anchors inside ordered
//! lists. An anchor is a candidate only if its href matches the card path
//! pattern `.../cards/<authorID>/card<titleID>.html`; everything else on the
//! page is silently skipped. The detail-page URL is reconstructed from the
//! captured IDs against the listing page's origin, never taken verbatim from
//! the href.

use crate::crawler::Candidate;
use crate::{BunkoError, Result};
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

/// Anchors considered for discovery: links inside ordered-list items
const LISTING_ANCHOR_SELECTOR: &str = "ol li a";

/// Card path pattern; captures are (author ID, title ID), both digit runs
const CARD_HREF_PATTERN: &str = r".*/cards/([0-9]+)/card([0-9]+)\.html$";

/// Parses a listing page into candidate works, in document order.
///
/// Non-matching anchors are a filter outcome, not an error; duplicates in
/// the source listing propagate as duplicates here.
pub fn parse_listing(html: &str, listing_url: &str) -> Result<Vec<Candidate>> {
    let base = Url::parse(listing_url).map_err(|e| BunkoError::Parse {
        url: listing_url.to_string(),
        message: e.to_string(),
    })?;
    let origin = base.origin().ascii_serialization();

    let selector = Selector::parse(LISTING_ANCHOR_SELECTOR).map_err(|e| BunkoError::Parse {
        url: listing_url.to_string(),
        message: e.to_string(),
    })?;
    let pattern = Regex::new(CARD_HREF_PATTERN).map_err(|e| BunkoError::Parse {
        url: listing_url.to_string(),
        message: e.to_string(),
    })?;

    let document = Html::parse_document(html);
    let mut candidates = Vec::new();

    for element in document.select(&selector) {
        let href = element.value().attr("href").unwrap_or("");
        let Some(captures) = pattern.captures(href) else {
            continue;
        };

        let author_id = captures[1].to_string();
        let title_id = captures[2].to_string();
        let page_url = format!("{}/cards/{}/card{}.html", origin, author_id, title_id);
        let title = element.text().collect::<String>();

        candidates.push(Candidate {
            author_id,
            title_id,
            title,
            page_url,
        });
    }

    Ok(candidates)
}
