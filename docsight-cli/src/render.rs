//! Terminal rendering of job states and results

use anyhow::Result;
use colored::*;
use docsight_core::domain::job::{JobId, JobResult};
use docsight_watch::{POLL_INTERVAL, WatchState};

/// Print a watch state as text, or as one JSON line
pub fn print_state(state: &WatchState, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(state)?);
        return Ok(());
    }

    match state {
        WatchState::Idle => {}
        WatchState::Checking { job_id } => {
            println!("{}", format!("Checking job status for {}...", job_id).cyan());
        }
        WatchState::Processing { polling: false, .. } => {
            println!("{}", "Document is being processed...".cyan());
        }
        WatchState::Processing { polling: true, .. } => {
            println!(
                "{}",
                format!(
                    "Checking every {} seconds (Ctrl-C to stop)",
                    POLL_INTERVAL.as_secs()
                )
                .dimmed()
            );
        }
        WatchState::Completed { result, .. } => print_result(result),
        WatchState::ResultUnavailable { error, detail, .. } => {
            println!("{} {}", "!".yellow(), error.yellow());
            println!("  {}", detail.dimmed());
        }
        WatchState::Failed { .. } => {
            println!(
                "{} {}",
                "✗".red(),
                "Analysis failed. Please try uploading your document again.".red()
            );
        }
        WatchState::Error { message, detail, .. } => {
            println!("{} {}", "✗".red(), message.red());
            println!("  {}", detail.dimmed());
        }
    }

    Ok(())
}

/// Print the analysis of a completed job
pub fn print_result(result: &JobResult) {
    println!("{} {}", "✓".green(), "Analysis Complete!".green().bold());
    println!();

    println!("{}", "Summary:".bold());
    println!("  {}", result.summary);
    println!();

    println!("{}", "Topics:".bold());
    if result.topics.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for (i, topic) in result.topics.iter().enumerate() {
        println!("  {}. {}", i + 1, topic.cyan());
    }
    println!();

    println!("{} {}", "Sentiment:".bold(), colorize_sentiment(&result.sentiment));
}

/// Print the job ID returned by an upload
pub fn print_submitted(job_id: &JobId) {
    println!("{} {}", "✓".green(), "Upload Successful!".green().bold());
    println!("  Your Job ID: {}", job_id.to_string().cyan().bold());
    println!(
        "  {}",
        format!("Follow it with: docsight status {}", job_id).dimmed()
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    Positive,
    Negative,
    Neutral,
}

fn polarity(sentiment: &str) -> Polarity {
    let lower = sentiment.to_lowercase();
    if lower.contains("positive") {
        Polarity::Positive
    } else if lower.contains("negative") {
        Polarity::Negative
    } else {
        Polarity::Neutral
    }
}

/// Colorize a sentiment label for display
fn colorize_sentiment(sentiment: &str) -> ColoredString {
    match polarity(sentiment) {
        Polarity::Positive => sentiment.green(),
        Polarity::Negative => sentiment.red(),
        Polarity::Neutral => sentiment.yellow(),
    }
}
