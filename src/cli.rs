// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `pollwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pollwatch",
    version,
    about = "Watch a path by polling and react when files change.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to watch (a directory subtree or a single file).
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Path to the config file (TOML).
    ///
    /// When omitted, `pollwatch.toml` in the current working directory is
    /// used if it exists; otherwise built-in defaults apply.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Polling interval in milliseconds (overrides the config file).
    #[arg(long, value_name = "MILLIS")]
    pub interval_ms: Option<u64>,

    /// Glob pattern a path must match to be tracked (repeatable).
    ///
    /// When given, replaces the config file's include list.
    #[arg(long, value_name = "GLOB")]
    pub include: Vec<String>,

    /// Glob pattern that removes a path from tracking (repeatable).
    ///
    /// When given, replaces the config file's exclude list.
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Fingerprint file contents (BLAKE3) instead of size + mtime only.
    #[arg(long)]
    pub content_hash: bool,

    /// Shell command to run after each detected change.
    #[arg(long, value_name = "CMD")]
    pub exec: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `POLLWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The `EnvFilter` directive equivalent of this level.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
