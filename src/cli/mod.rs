//! CLI argument parsing for memepack
//!
//! Uses clap. Sources are repeatable; every other flag is optional apart
//! from the output directory.

pub mod output;

use clap::Parser;
use std::path::PathBuf;

pub use output::OutputFormat;

/// Memepack - aggregate meme/emoji packs into one asset store and index
#[derive(Parser, Debug)]
#[command(name = "memepack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source repository directory (repeatable)
    #[arg(long = "src", value_name = "DIR", required = true, action = clap::ArgAction::Append)]
    pub sources: Vec<PathBuf>,

    /// Output directory for assets, infos.json and keyMap.json
    #[arg(long, value_name = "DIR")]
    pub out_dir: PathBuf,

    /// TOML file with extra extensions, skipped directories and repo aliases
    #[arg(long, value_name = "FILE", env = "MEMEPACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for the run summary
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short)]
    pub quiet: bool,

    /// Show per-source details and debug logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace) or a full filter directive
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,
}
