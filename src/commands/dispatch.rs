//! Command dispatch logic for memepack
use std::time::Instant;

use chrono::Utc;

use crate::cli::Cli;
use crate::commands;
use memepack_core::config::AggregateConfig;
use memepack_core::error::Result;
use memepack_core::pipeline::AggregateOptions;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AggregateConfig::load(path)?,
        None => AggregateConfig::default(),
    };
    tracing::debug!(elapsed = ?start.elapsed(), "load_config");

    let options = AggregateOptions {
        sources: cli.sources.clone(),
        out_dir: cli.out_dir.clone(),
        config,
    };

    commands::aggregate::execute(cli, &options, Utc::now())?;
    tracing::debug!(elapsed = ?start.elapsed(), "run");
    Ok(())
}
