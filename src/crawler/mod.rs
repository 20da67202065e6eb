//! Acquisition pipeline
//!
//! This module contains the crawl side of the tool:
//! - Listing-page discovery of candidate works
//! - Detail-page resolution to author and archive URL
//! - Archive download, extraction, and transcoding
//! - The `collect` orchestration that persists everything
//!
//! The pipeline is strictly sequential: one request in flight at a time,
//! entities processed in document order. Per-entity failures are logged and
//! skipped; only a failure on the listing page itself aborts the run.

mod archive;
mod detail;
mod discovery;
mod fetcher;

pub use archive::{extract_from_archive, extract_text};
pub use detail::{parse_detail, resolve_detail, DetailPage};
pub use discovery::parse_listing;
pub use fetcher::{build_http_client, fetch_bytes, fetch_text};

use crate::storage::Storage;
use crate::{segmenter, Result};
use reqwest::Client;

/// A work discovered on a listing page, before detail resolution
#[derive(Debug, Clone)]
pub struct Candidate {
    pub author_id: String,
    pub title_id: String,
    pub title: String,
    pub page_url: String,
}

/// A fully resolved work: identifiers, descriptive fields, and locators
///
/// Only produced with a non-empty absolute `zip_url`; candidates that
/// resolve to no archive are dropped, not forwarded.
#[derive(Debug, Clone)]
pub struct Entity {
    pub author_id: String,
    pub author: String,
    pub title_id: String,
    pub title: String,
    pub page_url: String,
    pub zip_url: String,
}

/// Counters for one collection run
#[derive(Debug, Default, Clone, Copy)]
pub struct CollectStats {
    /// Entities that survived discovery and detail resolution
    pub discovered: usize,
    /// Entities whose text was extracted and persisted
    pub stored: usize,
    /// Entities dropped by extraction or persistence failures
    pub skipped: usize,
}

/// Discovers all downloadable works on a listing page.
///
/// Fetches the listing (fatal on failure), then resolves each candidate's
/// detail page in document order. Candidates without an archive URL are
/// dropped silently; the returned entities all carry an absolute `zip_url`.
pub async fn find_entries(client: &Client, listing_url: &str) -> Result<Vec<Entity>> {
    let html = fetch_text(client, listing_url).await?;
    let candidates = parse_listing(&html, listing_url)?;
    tracing::debug!("{}: {} candidate anchors", listing_url, candidates.len());

    let mut entries = Vec::new();
    for candidate in candidates {
        let detail = resolve_detail(client, &candidate.page_url).await;
        if detail.zip_url.is_empty() {
            tracing::debug!("{}: no archive link, dropped", candidate.page_url);
            continue;
        }

        entries.push(Entity {
            author_id: candidate.author_id,
            author: detail.author,
            title_id: candidate.title_id,
            title: candidate.title,
            page_url: candidate.page_url,
            zip_url: detail.zip_url,
        });
    }

    Ok(entries)
}

/// Runs the full acquisition pipeline for one listing page.
///
/// Each entity's archive is downloaded, decoded, and stored together with
/// its segmented word stream for the full-text index. Extraction or storage
/// failures skip the entity and continue with the next one.
pub async fn collect(
    client: &Client,
    storage: &Storage,
    listing_url: &str,
) -> Result<CollectStats> {
    let entries = find_entries(client, listing_url).await?;

    let mut stats = CollectStats {
        discovered: entries.len(),
        ..CollectStats::default()
    };

    for entry in entries {
        let content = match extract_text(client, &entry.zip_url).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("skipping {}: {}", entry.zip_url, e);
                stats.skipped += 1;
                continue;
            }
        };

        let words = segmenter::segment_to_words(&content);
        if let Err(e) = storage.add_entry(&entry, &content, &words) {
            tracing::warn!("failed to store {}: {}", entry.page_url, e);
            stats.skipped += 1;
            continue;
        }

        tracing::info!("stored {} ({})", entry.title, entry.page_url);
        stats.stored += 1;
    }

    Ok(stats)
}
