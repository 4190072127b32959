//! Status command handler
//!
//! Checks a job and keeps printing its state until it reaches a terminal
//! state or the user interrupts.

use std::sync::Arc;

use anyhow::Result;
use colored::*;
use docsight_watch::{AnalysisRepository, JobStatusPoller, WatchState};
use tokio::signal;

use crate::config::Config;
use crate::render;

/// Watch a job until it completes, fails, or Ctrl-C is pressed
pub async fn watch_job(
    repository: Arc<dyn AnalysisRepository>,
    job_id: &str,
    config: &Config,
) -> Result<()> {
    let (poller, mut stream) = JobStatusPoller::new(repository);

    let checked = tokio::select! {
        checked = poller.check(job_id) => checked,
        _ = signal::ctrl_c() => {
            poller.teardown();
            println!("{}", "Stopped watching.".yellow());
            return Ok(());
        }
    };

    if let Err(e) = checked {
        // validation errors are never published; everything else is
        while let Some(state) = stream.try_next() {
            render::print_state(&state, config.json)?;
        }
        return Err(e.into());
    }

    let terminal = loop {
        let next = tokio::select! {
            next = stream.next() => next,
            _ = signal::ctrl_c() => {
                poller.teardown();
                println!("{}", "Stopped watching.".yellow());
                return Ok(());
            }
        };

        let Some(state) = next else {
            anyhow::bail!("Watcher stopped unexpectedly");
        };
        render::print_state(&state, config.json)?;

        if state.is_terminal() {
            break state;
        }
    };

    match terminal {
        WatchState::Failed { job_id } => anyhow::bail!("Job {} failed", job_id),
        WatchState::Error { detail, .. } => anyhow::bail!("Status check failed: {}", detail),
        WatchState::ResultUnavailable { detail, .. } => {
            anyhow::bail!("Result unavailable: {}", detail)
        }
        _ => Ok(()),
    }
}
