//! Fargate Census - aggregate task counts for Fargate services on AWS ECS
//!
//! This tool discovers every ECS cluster in the configured account/region,
//! lists the services in each cluster, fetches their task-count statistics,
//! and prints a single Fargate-only total to stdout. It uses the AWS SDK for
//! Rust for cloud integration.

mod app;
mod aws;
mod config;
mod stats;

use anyhow::{Context, Result};
use app::App;
use config::Config;
use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber.
///
/// Respects `RUST_LOG` and defaults to `info`. Diagnostics go to stderr so
/// stdout carries only the report.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Application entry point.
///
/// Loads configuration, builds the app, runs the census pipeline once, and
/// writes the resulting summary to stdout. A pipeline failure still prints
/// the zero summary and exits 0; only configuration problems exit non-zero.
///
/// # Errors
/// This function will return an error if:
/// - The configuration file cannot be read or parsed
/// - AWS client initialization fails
#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = Config::load()?;
    let app = App::new(config).await?;

    let summary = app.run().await;

    match app.config.output.format.as_str() {
        "json" => {
            let rendered = serde_json::to_string_pretty(&summary)
                .context("Failed to serialize summary to JSON")?;
            println!("{rendered}");
        }
        _ => println!("{summary}"),
    }

    Ok(())
}
