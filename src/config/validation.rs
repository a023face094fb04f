use crate::config::types::{ArchiveConfig, BackoffConfig, Config, SiteConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_archive_config(&config.archive)?;
    validate_backoff_config(&config.backoff)?;
    Ok(())
}

/// Validates the listing site profile
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "https" && base.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "base-url must be an HTTP(S) URL, got '{}'",
            config.base_url
        )));
    }

    if config.author_path.trim_matches('/').is_empty() {
        return Err(ConfigError::Validation(
            "author-path cannot be empty".to_string(),
        ));
    }

    if config.page_concurrency < 1 || config.page_concurrency > 64 {
        return Err(ConfigError::Validation(format!(
            "page-concurrency must be between 1 and 64, got {}",
            config.page_concurrency
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    validate_selector("pagination-selector", &config.pagination_selector)?;
    validate_selector("content-selector", &config.content_selector)?;
    validate_selector("post-title-selector", &config.post_title_selector)?;

    Ok(())
}

/// Validates archive submission settings
fn validate_archive_config(config: &ArchiveConfig) -> Result<(), ConfigError> {
    Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid archive endpoint: {}", e)))?;

    if config.batch_size < 1 {
        return Err(ConfigError::Validation(format!(
            "batch-size must be >= 1, got {}",
            config.batch_size
        )));
    }

    Ok(())
}

/// Validates backoff bounds
fn validate_backoff_config(config: &BackoffConfig) -> Result<(), ConfigError> {
    // A zero floor can never double out of zero, leaving throttled
    // retries with no pause at all
    if config.min_wait_secs < 1 {
        return Err(ConfigError::Validation(
            "min-wait-secs must be at least 1".to_string(),
        ));
    }

    if config.min_wait_secs > config.max_wait_secs {
        return Err(ConfigError::Validation(format!(
            "min-wait-secs ({}) must not exceed max-wait-secs ({})",
            config.min_wait_secs, config.max_wait_secs
        )));
    }

    Ok(())
}

/// Checks that a CSS selector parses, so a typo fails at startup rather
/// than mid-run
fn validate_selector(name: &str, selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector).map_err(|e| {
        ConfigError::Validation(format!("{} '{}' is not a valid selector: {}", name, selector, e))
    })?;
    Ok(())
}
