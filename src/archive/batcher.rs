//! Batched archive submission with adaptive backoff
//!
//! Posts are submitted in fixed-size batches, each batch's submissions
//! running concurrently. A rate-limit signal pauses the whole pipeline for
//! the controller's current wait, doubles it, and resubmits only the posts
//! not yet confirmed; any other submission error ends the run, keeping the
//! results of previously completed batches.

use crate::archive::backoff::BackoffController;
use crate::archive::client::{ArchiveClient, ArchivedResult};
use crate::listing::PostReference;
use crate::ArchiverError;
use futures_util::future::join_all;

/// What a batch-archiving pass produced
#[derive(Debug)]
pub struct BatchOutcome {
    /// Snapshot results from every completed batch, in completion order
    pub archived: Vec<ArchivedResult>,

    /// The error that stopped the run early, if any
    pub error: Option<ArchiverError>,
}

impl BatchOutcome {
    /// Whether the run stopped before archiving everything
    pub fn is_partial(&self) -> bool {
        self.error.is_some()
    }
}

/// Drives concurrent archive submissions in fixed-size batches
pub struct BatchArchiver<'a, C> {
    client: &'a C,
    backoff: BackoffController,
    batch_size: usize,
    max_batch_retries: Option<u32>,
}

impl<'a, C: ArchiveClient> BatchArchiver<'a, C> {
    pub fn new(
        client: &'a C,
        backoff: BackoffController,
        batch_size: usize,
        max_batch_retries: Option<u32>,
    ) -> Self {
        Self {
            client,
            backoff,
            batch_size,
            max_batch_retries,
        }
    }

    /// The backoff controller's current state, for inspection
    pub fn backoff(&self) -> &BackoffController {
        &self.backoff
    }

    /// Archives every post, batch by batch
    ///
    /// Between batches the pipeline sleeps for the controller's current
    /// wait and then relaxes it, so a relaxation only shortens the pause
    /// after the following batch. The final batch skips the sleep but
    /// still relaxes the controller.
    pub async fn archive_all(&mut self, posts: &[PostReference]) -> BatchOutcome {
        let mut archived = Vec::with_capacity(posts.len());
        let batch_count = posts.len().div_ceil(self.batch_size.max(1));

        for (index, batch) in posts.chunks(self.batch_size.max(1)).enumerate() {
            tracing::info!(
                "Archiving batch {}/{} ({} posts)",
                index + 1,
                batch_count,
                batch.len()
            );

            let (results, error) = self.archive_batch(batch).await;
            archived.extend(results);
            if let Some(error) = error {
                tracing::error!("Batch {}/{} failed: {}", index + 1, batch_count, error);
                return BatchOutcome {
                    archived,
                    error: Some(error),
                };
            }

            if index + 1 < batch_count {
                let pause = self.backoff.current_wait();
                tracing::debug!(
                    "Archived {} posts so far; pausing {:?} before the next batch",
                    archived.len(),
                    pause
                );
                tokio::time::sleep(pause).await;
            }
            self.backoff.on_batch_success();
        }

        BatchOutcome {
            archived,
            error: None,
        }
    }

    /// Submits one batch, retrying until every post in it is confirmed
    ///
    /// Returns whatever was confirmed, plus the error that stopped the
    /// batch, if any. Posts confirmed on earlier attempts are never
    /// resubmitted and stay credited even when a later attempt fails. A
    /// non-rate-limit error discards only the failing attempt's results.
    async fn archive_batch(
        &mut self,
        batch: &[PostReference],
    ) -> (Vec<ArchivedResult>, Option<ArchiverError>) {
        let mut confirmed = Vec::with_capacity(batch.len());
        let mut pending: Vec<&PostReference> = batch.iter().collect();
        let mut attempts = 0u32;

        loop {
            let results = join_all(pending.iter().map(|post| self.client.save(&post.url))).await;

            let mut attempt_confirmed = Vec::new();
            let mut still_pending = Vec::new();
            let mut fatal = None;
            for (post, result) in pending.iter().zip(results) {
                match result {
                    Ok(snapshot_url) => {
                        tracing::debug!("Archived {} -> {}", post.url, snapshot_url);
                        attempt_confirmed.push(ArchivedResult {
                            post_url: post.url.clone(),
                            snapshot_url,
                        });
                    }
                    Err(e) if e.is_rate_limit() => still_pending.push(*post),
                    Err(e) => fatal = fatal.or(Some(e)),
                }
            }

            if let Some(error) = fatal {
                return (confirmed, Some(error));
            }
            confirmed.extend(attempt_confirmed);
            if still_pending.is_empty() {
                return (confirmed, None);
            }

            attempts += 1;
            if let Some(max) = self.max_batch_retries {
                if attempts > max {
                    return (confirmed, Some(ArchiverError::RetriesExhausted { attempts }));
                }
            }

            let wait = self.backoff.current_wait();
            tracing::warn!(
                "Rate limited with {} posts unconfirmed; backing off for {:?}",
                still_pending.len(),
                wait
            );
            tokio::time::sleep(wait).await;
            self.backoff.on_throttled();
            tracing::info!("Resuming.");
            pending = still_pending;
        }
    }
}
