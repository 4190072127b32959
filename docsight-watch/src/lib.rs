//! Docsight Watch
//!
//! Client-side tracking of analysis jobs.
//!
//! Architecture:
//! - Repository: the backend operations the watcher depends on
//! - Fetcher: one-shot retrieval and validation of a completed job's result
//! - Poller: the status lifecycle of the one job currently being watched
//! - State: the transitions published to the consumer
//!
//! Given a job identifier, the poller queries its status, polls every
//! [`POLL_INTERVAL`] while the job is processing, fetches the result exactly
//! once when it completes, and stops as soon as the job is terminal or the
//! consumer resets.

pub mod error;
pub mod fetcher;
pub mod poller;
pub mod repository;
pub mod state;

pub use error::{FetchError, PollerError};
pub use fetcher::JobResultFetcher;
pub use poller::{JobStatusPoller, POLL_INTERVAL};
pub use repository::{AnalysisRepository, HttpAnalysisRepository};
pub use state::{CheckOutcome, WatchState, WatchStream};

#[cfg(test)]
pub(crate) mod test_support;
