//! Job domain types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of characters a job identifier must have
pub const MIN_JOB_ID_LEN: usize = 3;

/// Opaque identifier of an analysis job
///
/// The backend owns the format; the only local rule is a minimum length,
/// checked after trimming surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

/// Reasons a job identifier is rejected before any request is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a job ID")]
    Empty,

    #[error("Job ID must be at least {MIN_JOB_ID_LEN} characters")]
    TooShort { len: usize },
}

impl JobId {
    /// Parses user input into a job identifier
    ///
    /// # Example
    /// ```
    /// use docsight_core::domain::job::JobId;
    ///
    /// let id = JobId::parse("  job_123 ").unwrap();
    /// assert_eq!(id.as_str(), "job_123");
    /// assert!(JobId::parse("ab").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let len = trimmed.chars().count();

        if len == 0 {
            return Err(ValidationError::Empty);
        }
        if len < MIN_JOB_ID_LEN {
            return Err(ValidationError::TooShort { len });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Backend-reported state of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Processing,
    Completed,
    Failed,
}

impl JobState {
    /// Completed and failed jobs never change state again
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One observation of a job's state
///
/// Every status query yields a fresh value; observations are never updated
/// in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub job_id: JobId,
    pub status: JobState,
    pub observed_at: DateTime<Utc>,
}

impl JobStatus {
    pub fn new(job_id: JobId, status: JobState) -> Self {
        Self {
            job_id,
            status,
            observed_at: Utc::now(),
        }
    }
}

/// Analysis output of a completed job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResult {
    pub job_id: JobId,
    pub summary: String,
    /// Topics in the order the backend reported them
    pub topics: Vec<String>,
    pub sentiment: String,
}
