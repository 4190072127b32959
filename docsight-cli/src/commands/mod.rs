//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod result;
mod status;
mod submit;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Upload a .txt document for analysis
    Submit {
        /// Path of the document (max 1MB)
        path: PathBuf,

        /// Keep watching the job until it finishes
        #[arg(short, long)]
        watch: bool,
    },
    /// Check a job and poll until it completes or fails
    Status {
        /// Job ID returned by `submit`
        job_id: String,
    },
    /// Fetch the result of a completed job
    Result {
        /// Job ID returned by `submit`
        job_id: String,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let repository = config.repository()?;

    match command {
        Commands::Submit { path, watch } => {
            submit::handle_submit(repository, &path, watch, config).await
        }
        Commands::Status { job_id } => status::watch_job(repository, &job_id, config).await,
        Commands::Result { job_id } => result::show_result(repository, &job_id).await,
    }
}
