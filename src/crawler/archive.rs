//! Archive extraction
//!
//! Downloads a work's zip archive, locates the embedded text payload, and
//! hands its bytes to the encoding module. The whole archive is buffered in
//! memory; a single literary work stays small.

use crate::crawler::fetcher::fetch_bytes;
use crate::encoding::decode_shift_jis;
use crate::{BunkoError, Result};
use reqwest::Client;
use std::io::{Cursor, Read};
use std::path::Path;

/// File-name extension of the text payload inside an archive
const TEXT_EXTENSION: &str = "txt";

/// Downloads an archive and returns its decoded text payload.
///
/// Fails with [`BunkoError::Status`] on a non-2xx response and
/// [`BunkoError::Network`] on transport failure; extraction failures come
/// from [`extract_from_archive`].
pub async fn extract_text(client: &Client, zip_url: &str) -> Result<String> {
    let bytes = fetch_bytes(client, zip_url).await?;
    extract_from_archive(&bytes)
}

/// Extracts and decodes the text payload from raw archive bytes.
///
/// Entries are scanned in container order and the *first* one with a `.txt`
/// extension is selected; the rest are ignored. No qualifying entry fails
/// with [`BunkoError::NotFound`]; a malformed Shift-JIS payload fails with
/// [`BunkoError::Decode`].
pub fn extract_from_archive(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if !has_text_extension(entry.name()) {
            continue;
        }

        let mut raw = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut raw)?;
        return decode_shift_jis(&raw);
    }

    Err(BunkoError::NotFound)
}

fn has_text_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TEXT_EXTENSION))
}
