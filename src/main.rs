//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use nhl_stats::{
    cli::{Commands, NhlStats},
    commands::{
        fetch::handle_fetch,
        report::{handle_report, ReportParams},
    },
    core::build_client,
};
use tracing_subscriber::EnvFilter;

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let app = NhlStats::parse();
    let client = build_client().context("building HTTP client")?;

    match app.command {
        Commands::Fetch {
            url,
            shaping,
            retry,
        } => handle_fetch(&client, url, shaping, retry).await?,

        Commands::Report {
            key,
            report,
            expression,
            shaping,
            retry,
            limit,
            start,
            no_aggregate,
            info,
        } => {
            handle_report(
                &client,
                ReportParams {
                    key,
                    report,
                    expression,
                    shaping,
                    retry,
                    limit,
                    start,
                    no_aggregate,
                    info,
                },
            )
            .await?
        }
    }

    Ok(())
}
