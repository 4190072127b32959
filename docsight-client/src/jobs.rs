//! Job-related API endpoints

use docsight_core::domain::job::{JobId, JobStatus};
use docsight_core::dto::job::{ResultPayload, StatusResponse};
use tracing::{debug, warn};

use crate::AnalysisClient;
use crate::error::{ClientError, Result};

impl AnalysisClient {
    // =============================================================================
    // Job Status
    // =============================================================================

    /// Query the current state of a job
    ///
    /// # Arguments
    /// * `job_id` - The job to query
    ///
    /// # Returns
    /// A fresh observation of the job's state. A response that names a
    /// different job is rejected as a [`ClientError::ParseError`].
    pub async fn job_status(&self, job_id: &JobId) -> Result<JobStatus> {
        let url = format!("{}/analyze/{}/status", self.base_url, job_id);
        debug!(%job_id, "Checking job status");

        let response = self.client.get(&url).send().await?;
        let body: StatusResponse = self.handle_response(response, job_id.as_str()).await?;

        if let Some(reported) = body.job_id.as_deref() {
            if reported != job_id.as_str() {
                warn!(%job_id, reported, "Status response names a different job");
                return Err(ClientError::ParseError(format!(
                    "Status response is for job {}, expected {}",
                    reported, job_id
                )));
            }
        }

        Ok(body.into_status(job_id))
    }

    // =============================================================================
    // Job Results
    // =============================================================================

    /// Fetch the raw result payload of a completed job
    ///
    /// The payload is returned unvalidated; fields are kept as raw JSON.
    ///
    /// # Arguments
    /// * `job_id` - The job whose result to fetch
    pub async fn job_result(&self, job_id: &JobId) -> Result<ResultPayload> {
        let url = format!("{}/analyze/{}/result", self.base_url, job_id);
        debug!(%job_id, "Fetching job result");

        let response = self.client.get(&url).send().await?;

        self.handle_response(response, job_id.as_str()).await
    }
}
