//! Submit command handler
//!
//! Validates a local document, uploads it and reports the job ID.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::*;
use docsight_core::domain::document::{Document, DocumentError, MAX_DOCUMENT_SIZE};
use docsight_watch::AnalysisRepository;

use crate::config::Config;
use crate::render;

use super::status;

/// Upload a document and optionally watch its job
pub async fn handle_submit(
    repository: Arc<dyn AnalysisRepository>,
    path: &Path,
    watch: bool,
    config: &Config,
) -> Result<()> {
    let document = load_document(path).await?;

    println!(
        "{}",
        format!(
            "Uploading {} ({} bytes)...",
            document.file_name(),
            document.size()
        )
        .dimmed()
    );

    let job_id = repository
        .submit_document(&document)
        .await
        .context("Failed to upload file. Please try again.")?;

    render::print_submitted(&job_id);

    if watch {
        println!();
        status::watch_job(repository, job_id.as_str(), config).await?;
    }

    Ok(())
}

/// Read and validate a document from disk
///
/// Oversized files are rejected from their metadata before being read.
pub async fn load_document(path: &Path) -> Result<Document> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Not a file path: {}", path.display()))?
        .to_string();

    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if metadata.len() > MAX_DOCUMENT_SIZE as u64 {
        return Err(DocumentError::TooLarge {
            size: usize::try_from(metadata.len()).unwrap_or(usize::MAX),
        }
        .into());
    }

    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(Document::new(file_name, content)?)
}
