//! Scripted in-memory backend for watcher tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use docsight_client::ClientError;
use docsight_core::domain::document::Document;
use docsight_core::domain::job::{JobId, JobState, JobStatus};
use docsight_core::dto::job::ResultPayload;
use serde_json::json;
use tokio::time::{self, Duration};

use crate::repository::AnalysisRepository;

/// Scripted answer to a status query
#[derive(Debug, Clone, Copy)]
pub enum StatusReply {
    State(JobState),
    NotFound,
    Unavailable,
}

pub use StatusReply::State;

/// Scripted answer to a result query
#[derive(Debug, Clone)]
pub enum ResultReply {
    Ok {
        summary: String,
        topics: Vec<String>,
        sentiment: String,
    },
    NotFound,
    Unavailable,
}

/// Answers status queries from a script; once the script runs out every
/// query reports `processing`
pub struct ScriptedRepository {
    statuses: Mutex<VecDeque<StatusReply>>,
    result: ResultReply,
    status_delay: Duration,
    result_delay: Duration,
    queried: Mutex<Vec<String>>,
    status_calls: AtomicUsize,
    result_calls: AtomicUsize,
}

impl ScriptedRepository {
    pub fn new() -> Self {
        Self {
            statuses: Mutex::new(VecDeque::new()),
            result: ResultReply::NotFound,
            status_delay: Duration::ZERO,
            result_delay: Duration::ZERO,
            queried: Mutex::new(Vec::new()),
            status_calls: AtomicUsize::new(0),
            result_calls: AtomicUsize::new(0),
        }
    }

    pub fn statuses(self, replies: impl IntoIterator<Item = StatusReply>) -> Self {
        self.statuses.lock().unwrap().extend(replies);
        self
    }

    pub fn result(mut self, reply: ResultReply) -> Self {
        self.result = reply;
        self
    }

    pub fn result_ok(self, summary: &str, topics: &[&str], sentiment: &str) -> Self {
        self.result(ResultReply::Ok {
            summary: summary.to_string(),
            topics: topics.iter().map(|t| t.to_string()).collect(),
            sentiment: sentiment.to_string(),
        })
    }

    /// Simulated round trip of every status query
    pub fn status_delay(mut self, delay: Duration) -> Self {
        self.status_delay = delay;
        self
    }

    /// Simulated round trip of every result query
    pub fn result_delay(mut self, delay: Duration) -> Self {
        self.result_delay = delay;
        self
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn result_calls(&self) -> usize {
        self.result_calls.load(Ordering::SeqCst)
    }

    /// Job ids of every status query, in order
    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisRepository for ScriptedRepository {
    async fn submit_document(&self, _document: &Document) -> Result<JobId, ClientError> {
        Ok(JobId::parse("job_submitted").unwrap())
    }

    async fn job_status(&self, job_id: &JobId) -> Result<JobStatus, ClientError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.queried.lock().unwrap().push(job_id.to_string());
        let reply = self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(State(JobState::Processing));

        if !self.status_delay.is_zero() {
            time::sleep(self.status_delay).await;
        }

        match reply {
            State(state) => Ok(JobStatus::new(job_id.clone(), state)),
            StatusReply::NotFound => Err(ClientError::NotFound(job_id.to_string())),
            StatusReply::Unavailable => Err(ClientError::api_error(503, "unavailable")),
        }
    }

    async fn job_result(&self, job_id: &JobId) -> Result<ResultPayload, ClientError> {
        self.result_calls.fetch_add(1, Ordering::SeqCst);

        if !self.result_delay.is_zero() {
            time::sleep(self.result_delay).await;
        }

        match &self.result {
            ResultReply::Ok {
                summary,
                topics,
                sentiment,
            } => Ok(ResultPayload {
                job_id: Some(json!(job_id)),
                summary: Some(json!(summary)),
                topics: Some(json!(topics)),
                sentiment: Some(json!(sentiment)),
            }),
            ResultReply::NotFound => Err(ClientError::NotFound(job_id.to_string())),
            ResultReply::Unavailable => Err(ClientError::api_error(500, "boom")),
        }
    }
}
