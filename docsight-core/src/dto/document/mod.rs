//! Document DTOs for backend communication

use serde::{Deserialize, Serialize};

/// Body returned by `POST /analyze`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub job_id: String,
}
