//! Structured logging for memepack runs
//!
//! Events go to stderr so stdout stays reserved for the run summary.
//! Filter precedence: `MEMEPACK_LOG`, then `RUST_LOG`, then `--log-level`,
//! then `--verbose` (debug) or the quiet default (warn).

use std::env;
use std::io;

use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

/// Environment variable holding a memepack-specific filter directive
pub const LOG_ENV: &str = "MEMEPACK_LOG";

/// Log elapsed time since `start` at trace level, tagged with a phase name.
///
/// ```rust,ignore
/// let start = Instant::now();
/// trace_time!(start, "walk", files = files.len());
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $phase:expr) => {
        tracing::trace!(phase = $phase, elapsed_ms = $start.elapsed().as_millis() as u64, "timing");
    };
    ($start:expr, $phase:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(
            phase = $phase,
            elapsed_ms = $start.elapsed().as_millis() as u64,
            $($field = $value),*,
            "timing"
        );
    };
}

/// Filter directive for the command-line flags alone
fn filter_directive(verbose: bool, log_level: Option<&str>) -> String {
    match log_level {
        // Full directives such as `memepack_core::scan=trace` pass through
        Some(level) if level.contains('=') => level.to_string(),
        // Target matching is by prefix, so this also covers `memepack_core`
        Some(level) => format!("memepack={level}"),
        None if verbose => "memepack=debug".to_string(),
        None => "memepack=warn".to_string(),
    }
}

fn env_directive() -> Option<String> {
    [LOG_ENV, EnvFilter::DEFAULT_ENV]
        .into_iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

/// Install the global subscriber for this process
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let directive = env_directive().unwrap_or_else(|| filter_directive(verbose, log_level));
    let filter = EnvFilter::try_new(&directive)?;

    let output: Box<dyn Layer<Registry> + Send + Sync> = if log_json {
        fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_ansi(false)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(io::stderr)
            .with_ansi(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(output)
        .with(filter)
        .try_init()?;
    Ok(())
}
