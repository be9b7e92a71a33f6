//! Memepack - meme pack aggregation CLI
//!
//! Walks one or more source repositories, copies every image/video asset
//! into a single store and writes a catalog plus a keyword index.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use memepack_core::error::{ExitCode as MemepackExitCode, MemepackError};
use memepack_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();
    let args: Vec<String> = env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let cli = match Cli::try_parse_from(env::args_os()) {
        Ok(cli) => cli,
        Err(err) => return parse_failure(err, wants_json_errors(&args)),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("warning: logging disabled: {e}");
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => exit_with(MemepackExitCode::Success),
        Err(e) => {
            if cli.format == OutputFormat::Json {
                eprintln!("{}", e.to_json());
            } else if !cli.quiet {
                eprintln!("error: {e}");
            }
            exit_with(e.exit_code())
        }
    }
}

fn exit_with(code: MemepackExitCode) -> ExitCode {
    ExitCode::from(code as u8)
}

/// Bad arguments become a `usage_error` envelope under `--format json`.
/// Help and version output always go through clap.
fn parse_failure(err: clap::Error, json: bool) -> ExitCode {
    let informational = matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    );
    if !json || informational {
        err.exit();
    }

    let usage = MemepackError::UsageError(err.render().to_string().trim_end().to_string());
    eprintln!("{}", usage.to_json());
    exit_with(usage.exit_code())
}

/// Whether raw argv asks for JSON output, checked before clap has validated it
fn wants_json_errors(args: &[String]) -> bool {
    args.iter().enumerate().skip(1).any(|(i, arg)| {
        arg == "--format=json"
            || (arg == "--format" && args.get(i + 1).is_some_and(|value| value == "json"))
    })
}
