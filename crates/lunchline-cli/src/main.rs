//! `lunchline` entry point.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use lunchline_cli::{Args, RunConfig, logging, run};

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_json);

    let config = RunConfig::from_args(&args)?;
    tracing::debug!(config = ?config, "Resolved configuration");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let summary = runtime.block_on(run(&config))?;

    tracing::info!(
        date = ?summary.date,
        sent = summary.sent,
        skipped = summary.skipped,
        empty = summary.empty,
        "Done"
    );
    Ok(())
}
