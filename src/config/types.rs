use serde::Deserialize;

/// Main configuration structure for ne-archive
///
/// Every section has embedded defaults matching the Nintendo Enthusiast
/// site profile, so a config file is only needed to override them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub archive: ArchiveConfig,
    pub backoff: BackoffConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            archive: ArchiveConfig::default(),
            backoff: BackoffConfig::default(),
        }
    }
}

/// Listing site profile: where author listings live and what their
/// markup looks like
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL of the content site
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path segment under which author listings live
    #[serde(rename = "author-path")]
    pub author_path: String,

    /// CSS selector for the pagination links on a listing page
    #[serde(rename = "pagination-selector")]
    pub pagination_selector: String,

    /// CSS selector for the main content container holding the post list
    #[serde(rename = "content-selector")]
    pub content_selector: String,

    /// CSS selector for post title elements inside the content container
    #[serde(rename = "post-title-selector")]
    pub post_title_selector: String,

    /// Maximum number of listing pages fetched concurrently
    #[serde(rename = "page-concurrency")]
    pub page_concurrency: usize,

    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.nintendoenthusiast.com".to_string(),
            author_path: "author".to_string(),
            pagination_selector: "a.mnmd-pagination__item".to_string(),
            content_selector: "div.mnmd-main-col".to_string(),
            post_title_selector: "h3.post__title".to_string(),
            page_concurrency: 8,
            user_agent: "Mozilla/5.0 (Windows NT 5.1; rv:40.0) Gecko/20100101 Firefox/40.0"
                .to_string(),
        }
    }
}

impl SiteConfig {
    /// Builds the root listing URL for an author slug
    pub fn author_listing_url(&self, author: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.author_path.trim_matches('/'),
            author
        )
    }
}

/// Archive submission configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Base URL of the Wayback Machine endpoint
    pub endpoint: String,

    /// Number of posts submitted concurrently as one retry unit
    #[serde(rename = "batch-size")]
    pub batch_size: usize,

    /// Maximum rate-limited retries per batch before giving up.
    /// Absent means retry indefinitely, as the archive service's
    /// throttling usually subsides eventually.
    #[serde(rename = "max-batch-retries")]
    pub max_batch_retries: Option<u32>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://web.archive.org".to_string(),
            batch_size: 15,
            max_batch_retries: None,
        }
    }
}

/// Adaptive backoff bounds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// Floor for the inter-batch wait, in seconds
    #[serde(rename = "min-wait-secs")]
    pub min_wait_secs: u64,

    /// Ceiling for the inter-batch wait, in seconds
    #[serde(rename = "max-wait-secs")]
    pub max_wait_secs: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            min_wait_secs: 60,
            max_wait_secs: 3600,
        }
    }
}

impl BackoffConfig {
    /// Raises the ceiling to the given number of minutes if that exceeds
    /// the configured maximum. The default ceiling may not be enough for
    /// large archive runs.
    pub fn raise_max_wait(&mut self, minutes: f64) {
        let override_secs = (minutes * 60.0) as u64;
        if override_secs > self.max_wait_secs {
            self.max_wait_secs = override_secs;
        }
    }
}
