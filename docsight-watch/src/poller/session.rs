//! Polling session bookkeeping
//!
//! A session is the record of the one job currently being watched. It owns
//! the cancellation token shared with every in-flight request of the
//! session and, while the job is processing, the handle of the poll task.

use docsight_core::domain::job::JobId;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Identifies a session; ids are never reused within a poller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SessionId(pub(crate) u64);

pub(crate) struct PollingSession {
    pub(crate) id: SessionId,
    pub(crate) job_id: JobId,
    pub(crate) token: CancellationToken,
    timer: Option<JoinHandle<()>>,
    result_claimed: bool,
}

impl PollingSession {
    pub(crate) fn new(id: SessionId, job_id: JobId) -> Self {
        Self {
            id,
            job_id,
            token: CancellationToken::new(),
            timer: None,
            result_claimed: false,
        }
    }

    /// True while the session is live
    pub(crate) fn is_live(&self, id: SessionId) -> bool {
        self.id == id && !self.token.is_cancelled()
    }

    pub(crate) fn is_polling(&self) -> bool {
        self.timer.is_some() && !self.token.is_cancelled()
    }

    pub(crate) fn arm_timer(&mut self, timer: JoinHandle<()>) {
        debug_assert!(self.timer.is_none(), "session already has a poll timer");
        if let Some(previous) = self.timer.replace(timer) {
            previous.abort();
        }
    }

    /// Forgets the poll task without aborting it
    ///
    /// Used from inside the poll task itself once it has seen a terminal
    /// status; the task exits on its own after finishing that tick.
    pub(crate) fn stop_timer(&mut self) {
        self.timer.take();
    }

    /// Marks the one-shot result fetch as taken
    ///
    /// Returns false if it was already taken.
    pub(crate) fn claim_result_fetch(&mut self) -> bool {
        !std::mem::replace(&mut self.result_claimed, true)
    }

    /// Ends a session that finished by itself
    pub(crate) fn close(mut self) {
        self.stop_timer();
        self.token.cancel();
    }

    /// Ends a session from outside: cancels in-flight requests and aborts the
    /// poll task
    pub(crate) fn terminate(mut self) {
        self.token.cancel();
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> PollingSession {
        PollingSession::new(SessionId(1), JobId::parse("job_1").unwrap())
    }

    #[test]
    fn test_result_fetch_claimed_once() {
        let mut session = session();
        assert!(session.claim_result_fetch());
        assert!(!session.claim_result_fetch());
        assert!(!session.claim_result_fetch());
    }

    #[test]
    fn test_liveness_tracks_id_and_token() {
        let session = session();
        assert!(session.is_live(SessionId(1)));
        assert!(!session.is_live(SessionId(2)));

        session.token.cancel();
        assert!(!session.is_live(SessionId(1)));
    }

    #[tokio::test]
    async fn test_terminate_aborts_timer() {
        let mut session = session();
        let token = session.token.clone();
        let timer = tokio::spawn(std::future::pending::<()>());
        session.arm_timer(timer);
        assert!(session.is_polling());

        session.terminate();
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_stop_timer_keeps_token() {
        let mut session = session();
        session.arm_timer(tokio::spawn(async {}));
        session.stop_timer();
        session.stop_timer();

        assert!(!session.is_polling());
        assert!(session.is_live(SessionId(1)));
    }
}
