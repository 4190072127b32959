//! One-shot result retrieval
//!
//! Fetches a completed job's result and checks its shape. The poller calls
//! this at most once per watched job; callers must report any failure as
//! "result unavailable", never as a failed job.

use std::sync::Arc;

use docsight_core::domain::job::{JobId, JobResult};
use docsight_core::dto::job::ResultPayload;
use serde_json::Value;
use tracing::debug;

use crate::error::FetchError;
use crate::repository::AnalysisRepository;

/// Fetches and validates job results
#[derive(Clone)]
pub struct JobResultFetcher {
    repository: Arc<dyn AnalysisRepository>,
}

impl JobResultFetcher {
    pub fn new(repository: Arc<dyn AnalysisRepository>) -> Self {
        Self { repository }
    }

    /// Fetch the result of a completed job
    ///
    /// # Errors
    /// * `ResultNotFound` if the backend has no result for the job
    /// * `ResultFetch` for any other transport or decode failure
    /// * `MalformedResult` if the payload fails validation
    pub async fn fetch(&self, job_id: &JobId) -> Result<JobResult, FetchError> {
        let payload = self
            .repository
            .job_result(job_id)
            .await
            .map_err(|e| FetchError::from_client(job_id, e))?;

        let result = validate_payload(job_id, payload)?;
        debug!(%job_id, topics = result.topics.len(), "Fetched job result");
        Ok(result)
    }
}

/// Checks a raw payload against the job it was requested for
fn validate_payload(requested: &JobId, payload: ResultPayload) -> Result<JobResult, FetchError> {
    let job_id = text_field("jobId", payload.job_id)?;
    if job_id != requested.as_str() {
        return Err(FetchError::MalformedResult(format!(
            "result is for job {}, expected {}",
            job_id, requested
        )));
    }

    let summary = text_field("summary", payload.summary)?;
    let sentiment = text_field("sentiment", payload.sentiment)?;
    let topics = match payload.topics {
        None | Some(Value::Null) => return Err(missing("topics")),
        Some(value) => decode_topics(value)?,
    };

    Ok(JobResult {
        job_id: requested.clone(),
        summary,
        topics,
        sentiment,
    })
}

fn text_field(field: &str, value: Option<Value>) -> Result<String, FetchError> {
    match value {
        None | Some(Value::Null) => Err(missing(field)),
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(FetchError::MalformedResult(format!(
            "`{}` must be a string, found {}",
            field, other
        ))),
    }
}

fn decode_topics(value: Value) -> Result<Vec<String>, FetchError> {
    let Value::Array(items) = value else {
        return Err(FetchError::MalformedResult(
            "topics must be a list of strings".to_string(),
        ));
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(topic) => Ok(topic),
            other => Err(FetchError::MalformedResult(format!(
                "topics must be a list of strings, found {}",
                other
            ))),
        })
        .collect()
}

fn missing(field: &str) -> FetchError {
    FetchError::MalformedResult(format!("missing field `{}`", field))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::{ResultReply, ScriptedRepository};

    fn id(s: &str) -> JobId {
        JobId::parse(s).unwrap()
    }

    fn payload(value: Value) -> ResultPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_validate_preserves_topic_order() {
        let result = validate_payload(
            &id("abc"),
            payload(json!({
                "jobId": "abc",
                "summary": "S",
                "topics": ["T2", "T1", "T3"],
                "sentiment": "Positive"
            })),
        )
        .unwrap();

        assert_eq!(result.job_id, id("abc"));
        assert_eq!(result.topics, vec!["T2", "T1", "T3"]);
        assert_eq!(result.sentiment, "Positive");
    }

    #[test]
    fn test_validate_accepts_empty_topics() {
        let result = validate_payload(
            &id("abc"),
            payload(json!({ "jobId": "abc", "summary": "", "topics": [], "sentiment": "Neutral" })),
        )
        .unwrap();
        assert!(result.topics.is_empty());
    }

    #[test]
    fn test_validate_rejects_missing_topics() {
        for topics in [None, Some(Value::Null)] {
            let mut raw = payload(json!({ "jobId": "abc", "summary": "S", "sentiment": "x" }));
            raw.topics = topics;

            let err = validate_payload(&id("abc"), raw).unwrap_err();
            assert!(
                matches!(err, FetchError::MalformedResult(ref m) if m.contains("topics")),
                "unexpected error: {err}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_non_string_topics() {
        let err = validate_payload(
            &id("abc"),
            payload(json!({ "jobId": "abc", "summary": "S", "topics": ["a", 2], "sentiment": "x" })),
        )
        .unwrap_err();
        assert!(matches!(err, FetchError::MalformedResult(_)));

        let err = validate_payload(
            &id("abc"),
            payload(json!({ "jobId": "abc", "summary": "S", "topics": "a,b", "sentiment": "x" })),
        )
        .unwrap_err();
        assert!(matches!(err, FetchError::MalformedResult(_)));
    }

    #[test]
    fn test_validate_rejects_job_id_mismatch() {
        let err = validate_payload(
            &id("abc"),
            payload(json!({ "jobId": "other", "summary": "S", "topics": [], "sentiment": "x" })),
        )
        .unwrap_err();
        assert!(matches!(err, FetchError::MalformedResult(ref m) if m.contains("other")));

        let err = validate_payload(
            &id("abc"),
            payload(json!({ "summary": "S", "topics": [], "sentiment": "x" })),
        )
        .unwrap_err();
        assert!(matches!(err, FetchError::MalformedResult(ref m) if m.contains("jobId")));
    }

    #[test]
    fn test_validate_rejects_wrongly_typed_fields() {
        for raw in [
            json!({ "jobId": 123, "summary": "S", "topics": [], "sentiment": "x" }),
            json!({ "jobId": "abc", "summary": 5, "topics": [], "sentiment": "x" }),
            json!({ "jobId": "abc", "summary": "S", "topics": [], "sentiment": ["x"] }),
        ] {
            let err = validate_payload(&id("abc"), payload(raw)).unwrap_err();
            assert!(
                matches!(err, FetchError::MalformedResult(ref m) if m.contains("must be a string")),
                "unexpected error: {err}"
            );
        }
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let repo = Arc::new(ScriptedRepository::new().result(ResultReply::NotFound));
        let fetcher = JobResultFetcher::new(repo.clone());

        let err = fetcher.fetch(&id("abc")).await.unwrap_err();
        assert!(matches!(err, FetchError::ResultNotFound(_)));
        assert_eq!(repo.result_calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_transport_failure() {
        let repo = Arc::new(ScriptedRepository::new().result(ResultReply::Unavailable));
        let fetcher = JobResultFetcher::new(repo);

        let err = fetcher.fetch(&id("abc")).await.unwrap_err();
        assert!(matches!(err, FetchError::ResultFetch(_)));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let repo = Arc::new(ScriptedRepository::new().result_ok("S", &["T1", "T2"], "Positive"));
        let fetcher = JobResultFetcher::new(repo);

        let result = fetcher.fetch(&id("abc")).await.unwrap();
        assert_eq!(result.summary, "S");
        assert_eq!(result.topics, vec!["T1", "T2"]);
    }
}
