//! Job DTOs for backend communication

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::job::{JobId, JobState, JobStatus};

/// Body of `GET /analyze/{jobId}/status`
///
/// Some backends omit `jobId`; the requested identifier is used instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    #[serde(default)]
    pub job_id: Option<String>,
    pub status: JobState,
}

impl StatusResponse {
    /// Turns the response into an observation of `requested`
    pub fn into_status(self, requested: &JobId) -> JobStatus {
        JobStatus::new(requested.clone(), self.status)
    }
}

/// Body of `GET /analyze/{jobId}/result`, before shape validation
///
/// Fields stay raw JSON so that a missing or wrongly typed field is
/// reported as a malformed result instead of failing the whole decode.
/// An explicit `null` decodes as `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPayload {
    #[serde(default)]
    pub job_id: Option<Value>,
    #[serde(default)]
    pub summary: Option<Value>,
    #[serde(default)]
    pub topics: Option<Value>,
    #[serde(default)]
    pub sentiment: Option<Value>,
}
