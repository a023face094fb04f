//! Archive submission pipeline
//!
//! This module contains the archiving half of a run: the Wayback Machine
//! client, the fixed-size batch driver with adaptive backoff, and the
//! top-level orchestrator that sequences discovery and submission.

mod backoff;
mod batcher;
mod client;
mod orchestrator;

pub use backoff::BackoffController;
pub use batcher::{BatchArchiver, BatchOutcome};
pub use client::{ArchiveClient, ArchivedResult, WaybackClient};
pub use orchestrator::{Archiver, RunOutcome, RunResult};
