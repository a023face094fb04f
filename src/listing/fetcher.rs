//! HTTP fetcher for listing pages
//!
//! Builds the shared HTTP client and wraps it behind the small interface
//! the paginator needs, so discovery logic can be exercised without a
//! network.

use crate::ArchiverError;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Builds an HTTP client with the configured user agent and sane timeouts
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Interface the paginator needs for page retrieval
pub trait PageFetcher {
    /// Fetches a URL and returns the response body as text
    fn fetch(&self, url: &str) -> impl Future<Output = crate::Result<String>>;
}

/// Production fetcher backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> crate::Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ArchiverError::Http {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArchiverError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| ArchiverError::Http {
            url: url.to_string(),
            source: e,
        })
    }
}
