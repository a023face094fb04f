//! Adaptive backoff between archive submission batches

use crate::config::BackoffConfig;
use std::time::Duration;

/// Bounded, exponentially adjusted wait duration
///
/// The wait doubles whenever the archive API throttles a batch and halves
/// after every successful batch, always staying within
/// `[min_wait, max_wait]`. It starts at the floor and lives for the run.
#[derive(Debug, Clone)]
pub struct BackoffController {
    wait: Duration,
    min_wait: Duration,
    max_wait: Duration,
}

impl BackoffController {
    /// Creates a controller with the given bounds, starting at the floor.
    /// A ceiling below the floor is raised to it.
    pub fn new(min_wait: Duration, max_wait: Duration) -> Self {
        let max_wait = max_wait.max(min_wait);
        Self {
            wait: min_wait,
            min_wait,
            max_wait,
        }
    }

    /// Doubles the wait, clamped to the ceiling. Called when the archive
    /// API rejects submissions with its throttling signal.
    pub fn on_throttled(&mut self) {
        self.wait = (self.wait * 2).min(self.max_wait);
    }

    /// Halves the wait, clamped to the floor. Called after every
    /// successfully completed batch so pressure relaxes once throttling
    /// subsides.
    pub fn on_batch_success(&mut self) {
        self.wait = (self.wait / 2).max(self.min_wait);
    }

    /// The duration to sleep before the next batch or retry
    pub fn current_wait(&self) -> Duration {
        self.wait
    }
}

impl From<&BackoffConfig> for BackoffController {
    fn from(config: &BackoffConfig) -> Self {
        Self::new(
            Duration::from_secs(config.min_wait_secs),
            Duration::from_secs(config.max_wait_secs),
        )
    }
}
