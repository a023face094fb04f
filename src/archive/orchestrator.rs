//! Top-level archive run sequencing
//!
//! Builds the author's root listing URL, discovers posts, drives the batch
//! archiver, classifies the outcome, and dumps every archived URL obtained
//! so far on all termination paths.

use crate::archive::backoff::BackoffController;
use crate::archive::batcher::BatchArchiver;
use crate::archive::client::WaybackClient;
use crate::config::Config;
use crate::listing::{build_http_client, HttpFetcher, ListingPaginator};
use crate::ArchiverError;

/// How an archive run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every discovered post was archived
    Complete,
    /// The run stopped early but some posts were archived
    Partial,
    /// Nothing was archived
    Failed,
}

impl RunOutcome {
    /// Process exit code for this outcome
    pub fn exit_code(self) -> u8 {
        match self {
            RunOutcome::Complete => 0,
            RunOutcome::Failed => 1,
            RunOutcome::Partial => 2,
        }
    }
}

/// Final result of an archive run
#[derive(Debug)]
pub struct RunResult {
    /// Snapshot URLs for every post archived before the run ended
    pub archived_urls: Vec<String>,
    pub outcome: RunOutcome,
}

/// Top-level archiver tying discovery and batch submission together
pub struct Archiver {
    config: Config,
    fetcher: HttpFetcher,
    wayback: WaybackClient,
}

impl Archiver {
    pub fn new(config: Config) -> crate::Result<Self> {
        let client = build_http_client(&config.site.user_agent)?;
        let fetcher = HttpFetcher::new(client.clone());
        let wayback = WaybackClient::new(client, &config.archive.endpoint)?;
        Ok(Self {
            config,
            fetcher,
            wayback,
        })
    }

    /// Runs a full archive pass for the given author slug
    pub async fn run(&self, author: &str) -> RunResult {
        tracing::info!("Archiving all posts from {}", author);
        let root_url = self.config.site.author_listing_url(author);

        let paginator = ListingPaginator::new(&self.fetcher, &self.config.site);
        // discover() errors rather than returning an empty list: a page
        // with no posts is a parse failure.
        let posts = match paginator.discover(&root_url).await {
            Ok(posts) => posts,
            Err(error @ ArchiverError::Discovery { .. }) => {
                tracing::error!(
                    "{}. Please check that the author name entered is valid.",
                    error
                );
                return RunResult {
                    archived_urls: Vec::new(),
                    outcome: RunOutcome::Failed,
                };
            }
            Err(error) => {
                tracing::error!("Discovery failed: {}", error);
                return RunResult {
                    archived_urls: Vec::new(),
                    outcome: RunOutcome::Failed,
                };
            }
        };

        tracing::info!(
            "Found {} posts. Archiving them; the Wayback Machine may throttle us, so this could take a while.",
            posts.len()
        );

        let backoff = BackoffController::from(&self.config.backoff);
        let mut batcher = BatchArchiver::new(
            &self.wayback,
            backoff,
            self.config.archive.batch_size,
            self.config.archive.max_batch_retries,
        );
        let outcome = batcher.archive_all(&posts).await;

        let archived_urls: Vec<String> = outcome
            .archived
            .iter()
            .map(|r| r.snapshot_url.clone())
            .collect();

        let run_outcome = if !outcome.is_partial() {
            RunOutcome::Complete
        } else if archived_urls.is_empty() {
            RunOutcome::Failed
        } else {
            RunOutcome::Partial
        };

        match run_outcome {
            RunOutcome::Complete => tracing::info!(
                "All {} posts successfully archived. Links to the archived pages:",
                posts.len()
            ),
            RunOutcome::Partial => tracing::info!(
                "Some author posts were successfully archived. Links to the archived pages:"
            ),
            RunOutcome::Failed => tracing::error!("No posts were archived."),
        }
        for url in &archived_urls {
            tracing::info!("{}", url);
        }

        RunResult {
            archived_urls,
            outcome: run_outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(RunOutcome::Complete.exit_code(), 0);
        assert_eq!(RunOutcome::Failed.exit_code(), 1);
        assert_eq!(RunOutcome::Partial.exit_code(), 2);
    }
}
