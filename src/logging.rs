// src/logging.rs

//! Logging setup for `pollwatch` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log filter:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `POLLWATCH_LOG` environment variable (a level or a full
//!    `EnvFilter` directive, e.g. "debug" or "pollwatch=trace")
//! 3. default to `info`
//!
//! Logs are sent to STDERR so that stdout stays free for the output of any
//! `--exec` command.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let directive = match cli_level {
        Some(lvl) => lvl.as_directive().to_string(),
        None => std::env::var("POLLWATCH_LOG").unwrap_or_else(|_| "info".to_string()),
    };

    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
