//! Result command handler

use std::sync::Arc;

use anyhow::Result;
use docsight_core::domain::job::JobId;
use docsight_watch::{AnalysisRepository, FetchError, JobResultFetcher};

use crate::render;

/// Fetch and print the result of a completed job
pub async fn show_result(repository: Arc<dyn AnalysisRepository>, job_id: &str) -> Result<()> {
    let job_id = JobId::parse(job_id)?;
    let fetcher = JobResultFetcher::new(repository);

    match fetcher.fetch(&job_id).await {
        Ok(result) => {
            render::print_result(&result);
            Ok(())
        }
        Err(FetchError::ResultNotFound(_)) => {
            anyhow::bail!("No result for job {} yet. Check its status first.", job_id)
        }
        Err(e) => Err(e.into()),
    }
}
