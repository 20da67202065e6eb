//! Bunko: an Aozora Bunko collector and full-text search tool
//!
//! This crate crawls per-author work listings on Aozora Bunko, resolves each
//! work to its downloadable zip archive, decodes the embedded Shift-JIS text,
//! and stores metadata plus full text in SQLite for free-text search.

pub mod config;
pub mod crawler;
pub mod encoding;
pub mod query;
pub mod segmenter;
pub mod storage;

use thiserror::Error;

/// Main error type for Bunko operations
#[derive(Debug, Error)]
pub enum BunkoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Status code error: {code} for {url}")]
    Status { url: String, code: u16 },

    #[error("Parse error for {url}: {message}")]
    Parse { url: String, message: String },

    #[error("No text entry found in archive")]
    NotFound,

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Query error: {0}")]
    Query(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Bunko operations
pub type Result<T> = std::result::Result<T, BunkoError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CollectStats, Entity};
pub use storage::Storage;
