//! Job status poller
//!
//! Tracks one job at a time. A check issues one status query; if the job is
//! still processing, a background task re-queries it every
//! [`POLL_INTERVAL`] until it completes, fails, a query errors, or the
//! consumer resets. A completed job's result is fetched exactly once.
//!
//! All session state lives behind a single lock. Every response is applied
//! only after confirming, under that lock, that the session that issued it
//! is still the live one, so late responses from a reset or superseded
//! session are dropped.

mod session;


use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use docsight_core::domain::job::{JobId, JobState, JobStatus};
use tokio::sync::mpsc;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::PollerError;
use crate::fetcher::JobResultFetcher;
use crate::repository::AnalysisRepository;
use crate::state::{
    CheckOutcome, INITIAL_CHECK_FAILED, POLL_CHECK_FAILED, WatchState, WatchStream,
};
use session::{PollingSession, SessionId};

/// Delay between background status queries
pub const POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// Watches the status of one analysis job at a time
///
/// Dropping the poller tears down any active session.
pub struct JobStatusPoller {
    shared: Arc<Shared>,
}

struct Shared {
    repository: Arc<dyn AnalysisRepository>,
    fetcher: JobResultFetcher,
    events: mpsc::UnboundedSender<WatchState>,
    inner: Mutex<Inner>,
}

struct Inner {
    session: Option<PollingSession>,
    state: WatchState,
    next_session: u64,
}

impl JobStatusPoller {
    /// Creates a poller and the stream its transitions are published on
    pub fn new(repository: Arc<dyn AnalysisRepository>) -> (Self, WatchStream) {
        let (events, rx) = mpsc::unbounded_channel();
        let shared = Shared {
            fetcher: JobResultFetcher::new(Arc::clone(&repository)),
            repository,
            events,
            inner: Mutex::new(Inner {
                session: None,
                state: WatchState::Idle,
                next_session: 0,
            }),
        };

        (
            Self {
                shared: Arc::new(shared),
            },
            WatchStream::new(rx),
        )
    }

    /// Checks a job and starts watching it
    ///
    /// Any session already active is terminated first. On `processing` the
    /// call returns right away and polling continues in the background; on
    /// `completed` the result is fetched before returning.
    ///
    /// # Errors
    /// * `Validation` if `job_id` is shorter than 3 characters after
    ///   trimming; nothing is queried and the current session is untouched
    /// * `StatusCheck` if the status query fails; no session remains
    /// * `Cancelled` if a reset or a newer check superseded this one
    pub async fn check(&self, job_id: &str) -> Result<CheckOutcome, PollerError> {
        let job_id = JobId::parse(job_id)?;
        let (session_id, token) = self.shared.begin_session(&job_id);

        let queried = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(PollerError::Cancelled),
            queried = self.shared.repository.job_status(&job_id) => queried,
        };

        let status = match queried {
            Ok(status) => status,
            Err(source) => {
                warn!(%job_id, error = %source, "Initial status check failed");
                let state = WatchState::error(job_id.clone(), INITIAL_CHECK_FAILED, &source);
                if !self.shared.finish(session_id, state) {
                    return Err(PollerError::Cancelled);
                }
                return Err(PollerError::StatusCheck { job_id, source });
            }
        };

        debug!(%job_id, status = %status.status, "Initial status received");

        match status.status {
            JobState::Processing => {
                if !Shared::start_polling(&self.shared, session_id, &token, &job_id) {
                    return Err(PollerError::Cancelled);
                }
                Ok(CheckOutcome::Processing(status))
            }
            JobState::Completed => self
                .shared
                .resolve_completed(session_id, &token, status)
                .await
                .ok_or(PollerError::Cancelled),
            JobState::Failed => {
                let state = WatchState::Failed {
                    job_id: job_id.clone(),
                };
                if !self.shared.finish(session_id, state) {
                    return Err(PollerError::Cancelled);
                }
                Ok(CheckOutcome::Failed(status))
            }
        }
    }

    /// Stops any active session and clears all observed state
    ///
    /// No poll tick fires after this returns, and responses still in flight
    /// are discarded. Safe to call at any time.
    pub fn reset(&self) {
        self.shared.clear();
    }

    /// Releases the poller's session when its consumer goes away
    ///
    /// Same effect as [`reset`](Self::reset); calling it again is a no-op.
    pub fn teardown(&self) {
        self.shared.clear();
    }

    /// The most recently published state
    pub fn current(&self) -> WatchState {
        self.shared.lock().state.clone()
    }

    /// True while a poll task is armed for the watched job
    pub fn is_polling(&self) -> bool {
        self.shared
            .lock()
            .session
            .as_ref()
            .is_some_and(PollingSession::is_polling)
    }

    /// The job of the live session, if any
    pub fn watched_job(&self) -> Option<JobId> {
        self.shared
            .lock()
            .session
            .as_ref()
            .map(|session| session.job_id.clone())
    }
}

impl Drop for JobStatusPoller {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl Inner {
    fn live_session(&mut self, id: SessionId) -> Option<&mut PollingSession> {
        self.session.as_mut().filter(|session| session.is_live(id))
    }

    fn publish(&mut self, state: WatchState, events: &mpsc::UnboundedSender<WatchState>) {
        self.state = state.clone();
        if events.send(state).is_err() {
            debug!("Watch stream closed, state not delivered");
        }
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces any active session with a fresh one for `job_id`
    fn begin_session(&self, job_id: &JobId) -> (SessionId, CancellationToken) {
        let mut inner = self.lock();

        if let Some(previous) = inner.session.take() {
            info!(job_id = %previous.job_id, "Stopping previous session");
            previous.terminate();
        }

        inner.next_session += 1;
        let session = PollingSession::new(SessionId(inner.next_session), job_id.clone());
        let ids = (session.id, session.token.clone());
        inner.session = Some(session);

        info!(%job_id, "Checking job status");
        inner.publish(
            WatchState::Checking {
                job_id: job_id.clone(),
            },
            &self.events,
        );

        ids
    }

    /// Arms the poll task for a processing job
    ///
    /// Returns false if the session is no longer live.
    fn start_polling(
        shared: &Arc<Self>,
        id: SessionId,
        token: &CancellationToken,
        job_id: &JobId,
    ) -> bool {
        let mut inner = shared.lock();
        if inner.live_session(id).is_none() {
            return false;
        }

        inner.publish(
            WatchState::Processing {
                job_id: job_id.clone(),
                polling: false,
            },
            &shared.events,
        );

        let timer = tokio::spawn(Self::poll(
            Arc::clone(shared),
            id,
            token.clone(),
            job_id.clone(),
        ));
        if let Some(session) = inner.live_session(id) {
            session.arm_timer(timer);
        }

        info!(%job_id, interval = ?POLL_INTERVAL, "Polling started");
        inner.publish(
            WatchState::Processing {
                job_id: job_id.clone(),
                polling: true,
            },
            &shared.events,
        );
        true
    }

    /// Background poll loop of one session
    ///
    /// Each tick waits for its query to finish before the next tick is
    /// awaited, so at most one query is in flight per session.
    async fn poll(shared: Arc<Self>, id: SessionId, token: CancellationToken, job_id: JobId) {
        let mut ticker = time::interval_at(Instant::now() + POLL_INTERVAL, POLL_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            if !shared.is_live(id) {
                break;
            }

            debug!(%job_id, "Polling job status");
            let queried = tokio::select! {
                biased;
                _ = token.cancelled() => break,
                queried = shared.repository.job_status(&job_id) => queried,
            };

            match queried {
                Ok(status) => match status.status {
                    JobState::Processing => {
                        debug!(%job_id, "Job still processing");
                    }
                    JobState::Completed => {
                        shared.resolve_completed(id, &token, status).await;
                        break;
                    }
                    JobState::Failed => {
                        shared.finish(
                            id,
                            WatchState::Failed {
                                job_id: job_id.clone(),
                            },
                        );
                        break;
                    }
                },
                Err(e) => {
                    warn!(%job_id, error = %e, "Status poll failed, polling stopped");
                    shared.finish(id, WatchState::error(job_id.clone(), POLL_CHECK_FAILED, &e));
                    break;
                }
            }
        }

        debug!(%job_id, "Poll loop exited");
    }

    /// Fetches the result of a completed job once and ends the session
    ///
    /// The poll timer is stopped before the fetch starts. Returns `None` if
    /// the session was superseded at any point.
    async fn resolve_completed(
        &self,
        id: SessionId,
        token: &CancellationToken,
        status: JobStatus,
    ) -> Option<CheckOutcome> {
        {
            let mut inner = self.lock();
            let session = inner.live_session(id)?;
            session.stop_timer();
            if !session.claim_result_fetch() {
                return None;
            }
        }

        let job_id = status.job_id.clone();
        let fetched = tokio::select! {
            biased;
            _ = token.cancelled() => return None,
            fetched = self.fetcher.fetch(&job_id) => fetched,
        };

        let (state, outcome) = match fetched {
            Ok(result) => (
                WatchState::Completed {
                    job_id,
                    result: result.clone(),
                },
                CheckOutcome::Completed { status, result },
            ),
            Err(error) => {
                warn!(%job_id, %error, "Job completed but its result is unavailable");
                (
                    WatchState::result_unavailable(job_id, &error),
                    CheckOutcome::ResultUnavailable { status, error },
                )
            }
        };

        self.finish(id, state).then_some(outcome)
    }

    /// Publishes a terminal state and closes the session
    ///
    /// Returns false, publishing nothing, if the session is no longer live.
    fn finish(&self, id: SessionId, state: WatchState) -> bool {
        let mut inner = self.lock();
        if inner.live_session(id).is_none() {
            debug!("Dropping response for a superseded session");
            return false;
        }

        if let Some(session) = inner.session.take() {
            info!(job_id = %session.job_id, "Session finished");
            session.close();
        }
        inner.publish(state, &self.events);
        true
    }

    fn is_live(&self, id: SessionId) -> bool {
        self.lock().live_session(id).is_some()
    }

    /// Terminates the live session, if any, and returns to `Idle`
    fn clear(&self) {
        let mut inner = self.lock();

        if let Some(session) = inner.session.take() {
            info!(job_id = %session.job_id, "Session cancelled");
            session.terminate();
        }

        if inner.state != WatchState::Idle {
            inner.publish(WatchState::Idle, &self.events);
        }
    }
}
