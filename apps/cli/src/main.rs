//! vidpush command-line entry point.

mod app;
mod cli;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = cli::Args::parse();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "starting vidpush");

    let config = match &args.config {
        Some(path) => config::Config::load_from(path)?,
        None => config::Config::load()?,
    };

    let rt = tokio::runtime::Runtime::new()?;
    let video = rt.block_on(app::run(args, config))?;

    println!("{}", video.id);
    Ok(())
}
