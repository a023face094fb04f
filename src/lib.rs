//! ne-archive: archive an author's Nintendo Enthusiast posts
//!
//! This crate discovers every post on an author's paginated listing and
//! submits each post URL to the Wayback Machine, adapting its pacing to the
//! archive service's rate limiting.

pub mod archive;
pub mod config;
pub mod listing;

use thiserror::Error;

/// Main error type for archive runs
#[derive(Debug, Error)]
pub enum ArchiverError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No pagination found at {url}; check that the author name is valid")]
    Discovery { url: String },

    #[error("Listing page {url} is missing expected markup: {message}")]
    PageParse { url: String, message: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Archive service rate limited the request for {url}")]
    RateLimited { url: String },

    #[error("Archive request for {url} failed with HTTP {status}")]
    ArchiveStatus { url: String, status: u16 },

    #[error("Gave up on batch after {attempts} rate-limited attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl ArchiverError {
    /// Whether this error is the archive API's throttling signal, which is
    /// recoverable through backoff rather than terminal for the run.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, ArchiverError::RateLimited { .. })
    }
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

/// Result type alias for archive operations
pub type Result<T> = std::result::Result<T, ArchiverError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use archive::{ArchivedResult, Archiver, BackoffController, RunOutcome, RunResult};
pub use config::Config;
pub use listing::PostReference;
