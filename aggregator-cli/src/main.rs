//! Binary crate for the `weather-aggregator` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive continent selection and credential setup
//! - Human-friendly table output

use clap::Parser;

mod cli;
mod table;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aggregator_core=info,aggregator_cli=info".into()),
        )
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
