use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;

use crate::gavel_metrics::MetricsLayer;
use crate::server::start_server;

mod api;
mod auction;
mod clock;
mod config;
mod gavel_metrics;
mod metrics_api;
mod server;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize a Tracing Subscriber
    let fmt_builder = tracing_subscriber::fmt()
        .with_file(false)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stderr().is_terminal());

    // Use the compact formatter if we're in a terminal, otherwise use the JSON formatter.
    if std::io::stderr().is_terminal() {
        tracing::subscriber::set_global_default(
            fmt_builder.compact().finish().with(MetricsLayer),
        )?;
    } else {
        tracing::subscriber::set_global_default(fmt_builder.json().finish().with(MetricsLayer))?;
    }

    // Parse the command line arguments; exits automatically on `--help` or
    // with invalid arguments.
    match config::Options::parse() {
        config::Options::Run(opts) => start_server(opts).await,
    }
}
