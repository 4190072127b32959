//! Document submission endpoint

use docsight_core::domain::document::Document;
use docsight_core::domain::job::JobId;
use docsight_core::dto::document::SubmitResponse;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use crate::AnalysisClient;
use crate::error::{ClientError, Result};

impl AnalysisClient {
    /// Upload a document for analysis
    ///
    /// The document is sent as the `file` part of a multipart form.
    ///
    /// # Returns
    /// The identifier of the job created for the document
    pub async fn submit_document(&self, document: &Document) -> Result<JobId> {
        let url = format!("{}/analyze", self.base_url);
        debug!(
            file_name = document.file_name(),
            size = document.size(),
            "Uploading document"
        );

        let part = Part::bytes(document.content().to_vec())
            .file_name(document.file_name().to_string())
            .mime_str("text/plain")?;
        let form = Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let body: SubmitResponse = self.handle_response(response, "analyze").await?;

        let job_id = JobId::parse(&body.job_id).map_err(|e| {
            ClientError::ParseError(format!("Backend returned an invalid job ID: {}", e))
        })?;

        info!(%job_id, file_name = document.file_name(), "Document submitted");
        Ok(job_id)
    }
}
