//! Error types for job watching

use docsight_client::ClientError;
use docsight_core::domain::job::{JobId, ValidationError};
use thiserror::Error;

/// Why a completed job's result could not be obtained
///
/// Every variant means "result unavailable". None of them says anything
/// about the job itself, which completed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The backend has no result for the job (yet)
    #[error("Result for job {0} not found")]
    ResultNotFound(JobId),

    /// Transport or decode failure while fetching the result
    #[error("Failed to fetch result: {0}")]
    ResultFetch(#[source] ClientError),

    /// The payload does not have the expected shape
    #[error("Malformed result: {0}")]
    MalformedResult(String),
}

impl FetchError {
    /// Classify a transport error raised while fetching `job_id`'s result
    pub fn from_client(job_id: &JobId, err: ClientError) -> Self {
        if err.is_not_found() {
            Self::ResultNotFound(job_id.clone())
        } else {
            Self::ResultFetch(err)
        }
    }
}

/// Errors returned by [`crate::JobStatusPoller::check`]
#[derive(Debug, Error)]
pub enum PollerError {
    /// The job identifier was rejected; no request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The initial status query failed; no polling was started
    #[error("Job not found or failed to check status")]
    StatusCheck {
        job_id: JobId,
        #[source]
        source: ClientError,
    },

    /// A reset, teardown or newer check superseded this one mid-flight
    #[error("Status check was cancelled")]
    Cancelled,
}

impl PollerError {
    /// True when the backend reported the job as unknown
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::StatusCheck { source, .. } if source.is_not_found())
    }
}
