//! Tour guide CLI
//!
//! Terminal front end for the tour guide: an interactive chat session plus
//! one-shot commands for questions, navigation and the offline phrasebook.

mod adapters;
mod cli;
mod commands;
mod config_loader;
mod output;
mod output_types;
mod probe;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    // Initialize tracing; stay quiet by default so logs don't interleave with the chat
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // The session is single-threaded; every component lives on this runtime
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(commands::execute(cli))
}
