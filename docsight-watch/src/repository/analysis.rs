//! Analysis backend repository

use async_trait::async_trait;
use docsight_client::{AnalysisClient, ClientError};
use docsight_core::domain::document::Document;
use docsight_core::domain::job::{JobId, JobStatus};
use docsight_core::dto::job::ResultPayload;

/// Backend operations used to submit documents and follow their jobs
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Uploads a document and returns the job created for it
    async fn submit_document(&self, document: &Document) -> Result<JobId, ClientError>;

    /// Queries the current state of a job
    async fn job_status(&self, job_id: &JobId) -> Result<JobStatus, ClientError>;

    /// Fetches the raw result payload of a completed job
    async fn job_result(&self, job_id: &JobId) -> Result<ResultPayload, ClientError>;
}

/// HTTP implementation of AnalysisRepository
#[derive(Debug, Clone)]
pub struct HttpAnalysisRepository {
    client: AnalysisClient,
}

impl HttpAnalysisRepository {
    pub fn new(client: AnalysisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AnalysisClient {
        &self.client
    }
}

#[async_trait]
impl AnalysisRepository for HttpAnalysisRepository {
    async fn submit_document(&self, document: &Document) -> Result<JobId, ClientError> {
        self.client.submit_document(document).await
    }

    async fn job_status(&self, job_id: &JobId) -> Result<JobStatus, ClientError> {
        self.client.job_status(job_id).await
    }

    async fn job_result(&self, job_id: &JobId) -> Result<ResultPayload, ClientError> {
        self.client.job_result(job_id).await
    }
}
