//! Wayback Machine submission client

use crate::ArchiverError;
use reqwest::{Client, StatusCode};
use std::future::Future;
use url::Url;

/// The URL of one stored snapshot, paired with the post it archives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedResult {
    pub post_url: Url,
    pub snapshot_url: String,
}

/// Interface the batch archiver needs from the archive submission API
pub trait ArchiveClient {
    /// Submits a URL for archiving and returns the snapshot URL.
    ///
    /// Fails with [`ArchiverError::RateLimited`] when the service signals
    /// throttling; any other error is terminal for the run.
    fn save(&self, url: &Url) -> impl Future<Output = crate::Result<String>>;
}

/// Production client speaking the Wayback Machine Save Page Now endpoint
#[derive(Debug, Clone)]
pub struct WaybackClient {
    client: Client,
    endpoint: Url,
}

impl WaybackClient {
    pub fn new(client: Client, endpoint: &str) -> crate::Result<Self> {
        Ok(Self {
            client,
            endpoint: Url::parse(endpoint)?,
        })
    }
}

impl ArchiveClient for WaybackClient {
    async fn save(&self, url: &Url) -> crate::Result<String> {
        let save_url = format!(
            "{}/save/{}",
            self.endpoint.as_str().trim_end_matches('/'),
            url
        );

        let response = self
            .client
            .get(&save_url)
            .send()
            .await
            .map_err(|e| ArchiverError::Http {
                url: save_url.clone(),
                source: e,
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ArchiverError::RateLimited {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ArchiverError::ArchiveStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Save Page Now puts the snapshot path in Content-Location; the
        // final response URL is the fallback.
        if let Some(location) = response
            .headers()
            .get("content-location")
            .and_then(|v| v.to_str().ok())
        {
            let snapshot = self.endpoint.join(location)?;
            return Ok(snapshot.to_string());
        }

        Ok(response.url().to_string())
    }
}
