//! Observable watch state
//!
//! The poller publishes every transition it decides on, in order, through a
//! [`WatchStream`]. A session ends with at most one terminal state.

use docsight_core::domain::job::{JobId, JobResult, JobStatus};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::FetchError;

/// Shown when the first status query for a job fails
pub const INITIAL_CHECK_FAILED: &str = "Job not found or failed to check status";

/// Shown when a background poll fails
pub const POLL_CHECK_FAILED: &str = "Failed to check job status";

/// Shown when a job completed but its result could not be retrieved
pub const RESULT_UNAVAILABLE: &str = "Job is completed but failed to retrieve results";

/// What the consumer currently knows about the watched job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum WatchState {
    /// Nothing is being watched
    Idle,

    /// The first status query is in flight
    Checking { job_id: JobId },

    /// The job is processing; `polling` is true once the poll loop is armed
    Processing { job_id: JobId, polling: bool },

    /// The job completed and its result was retrieved
    Completed { job_id: JobId, result: JobResult },

    /// The job completed but its result could not be retrieved
    ResultUnavailable {
        job_id: JobId,
        error: String,
        detail: String,
    },

    /// The analysis itself failed
    Failed { job_id: JobId },

    /// A status query failed; the job's state is unknown
    Error {
        job_id: JobId,
        message: String,
        detail: String,
    },
}

impl WatchState {
    /// Terminal states end a session
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed { .. }
                | Self::ResultUnavailable { .. }
                | Self::Failed { .. }
                | Self::Error { .. }
        )
    }

    pub fn job_id(&self) -> Option<&JobId> {
        match self {
            Self::Idle => None,
            Self::Checking { job_id }
            | Self::Processing { job_id, .. }
            | Self::Completed { job_id, .. }
            | Self::ResultUnavailable { job_id, .. }
            | Self::Failed { job_id }
            | Self::Error { job_id, .. } => Some(job_id),
        }
    }

    pub(crate) fn result_unavailable(job_id: JobId, error: &FetchError) -> Self {
        Self::ResultUnavailable {
            job_id,
            error: RESULT_UNAVAILABLE.to_string(),
            detail: error.to_string(),
        }
    }

    pub(crate) fn error(job_id: JobId, message: &str, detail: impl ToString) -> Self {
        Self::Error {
            job_id,
            message: message.to_string(),
            detail: detail.to_string(),
        }
    }
}

/// Outcome of a successful [`crate::JobStatusPoller::check`]
#[derive(Debug)]
pub enum CheckOutcome {
    /// The job is processing and background polling has started
    Processing(JobStatus),

    /// The job had already completed and its result was fetched
    Completed { status: JobStatus, result: JobResult },

    /// The job had already completed but its result is unavailable
    ResultUnavailable { status: JobStatus, error: FetchError },

    /// The job had already failed
    Failed(JobStatus),
}

impl CheckOutcome {
    pub fn status(&self) -> &JobStatus {
        match self {
            Self::Processing(status)
            | Self::Completed { status, .. }
            | Self::ResultUnavailable { status, .. }
            | Self::Failed(status) => status,
        }
    }
}

/// Ordered stream of state transitions published by a poller
#[derive(Debug)]
pub struct WatchStream {
    rx: mpsc::UnboundedReceiver<WatchState>,
}

impl WatchStream {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<WatchState>) -> Self {
        Self { rx }
    }

    /// Waits for the next transition
    ///
    /// Returns `None` once the poller and its background task are gone.
    pub async fn next(&mut self) -> Option<WatchState> {
        self.rx.recv().await
    }

    /// Returns the next transition if one is already queued
    pub fn try_next(&mut self) -> Option<WatchState> {
        self.rx.try_recv().ok()
    }

    /// Skips ahead to the next terminal state
    pub async fn next_terminal(&mut self) -> Option<WatchState> {
        loop {
            let state = self.next().await?;
            if state.is_terminal() {
                return Some(state);
            }
        }
    }
}
