//! HTTP fetcher
//!
//! All network access for the acquisition pipeline goes through this module:
//! - Building the HTTP client with a proper user agent
//! - GET requests for listing/detail pages (text bodies)
//! - GET requests for archives (byte bodies)
//!
//! Every fetch is a single request with no retry; the caller decides whether
//! a failure is fatal or skippable.

use crate::{BunkoError, Result};
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used for the whole collection run
pub fn build_http_client(user_agent: &str) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns the response body as text
///
/// Any non-2xx status is an error for the call ([`BunkoError::Status`]);
/// transport failures map to [`BunkoError::Network`].
pub async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await.map_err(|source| {
        BunkoError::Network {
            url: url.to_string(),
            source,
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(BunkoError::Status {
            url: url.to_string(),
            code: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| BunkoError::Network {
        url: url.to_string(),
        source,
    })
}

/// Fetches a URL and returns the raw response body
///
/// The whole body is buffered in memory; archives are single literary works
/// and stay small.
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send().await.map_err(|source| {
        BunkoError::Network {
            url: url.to_string(),
            source,
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(BunkoError::Status {
            url: url.to_string(),
            code: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(|source| BunkoError::Network {
        url: url.to_string(),
        source,
    })?;

    Ok(body.to_vec())
}
