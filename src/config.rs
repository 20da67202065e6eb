//! Collector configuration
//!
//! The `collect` subcommand can take its listing URLs and database path from
//! a TOML file instead of the command line. Everything here is optional for
//! the read-only subcommands, which only need a database path.

use crate::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::Path;
use url::Url;

/// Configuration for a collection run
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the SQLite database file
    #[serde(default = "default_database")]
    pub database: String,

    /// Work-listing pages to crawl (one per author index page)
    #[serde(rename = "listing-urls", default)]
    pub listing_urls: Vec<String>,

    /// User agent string sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

fn default_database() -> String {
    "bunko.sqlite".to_string()
}

fn default_user_agent() -> String {
    format!("bunko/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            listing_urls: Vec::new(),
            user_agent: default_user_agent(),
        }
    }
}

/// Loads and validates a configuration file from the given path
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Validates a configuration
///
/// Listing URLs must parse and use an http(s) scheme; the database path and
/// user agent must be non-empty.
pub fn validate(config: &Config) -> ConfigResult<()> {
    if config.database.trim().is_empty() {
        return Err(ConfigError::Validation(
            "database path must not be empty".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent must not be empty".to_string(),
        ));
    }

    for listing_url in &config.listing_urls {
        let parsed = Url::parse(listing_url)
            .map_err(|_| ConfigError::InvalidUrl(listing_url.clone()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(listing_url.clone()));
        }
    }

    Ok(())
}
