//! Docsight CLI
//!
//! Command-line interface for submitting documents for analysis and
//! following their jobs until they finish.

mod commands;
mod config;
mod render;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "docsight")]
#[command(about = "Document analysis CLI", long_about = None)]
struct Cli {
    /// Analysis API base URL
    #[arg(
        long,
        env = "DOCSIGHT_API_URL",
        default_value = docsight_client::DEFAULT_BASE_URL
    )]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "DOCSIGHT_REQUEST_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Print job states as JSON lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docsight_cli=warn,docsight_watch=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        request_timeout: Duration::from_secs(cli.timeout),
        json: cli.json,
    };
    config.validate()?;
    tracing::debug!(api_url = %config.api_url, timeout = ?config.request_timeout, "Configuration loaded");

    handle_command(cli.command, &config).await
}
