// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::errors::{PollwatchError, Result};
use crate::types::FingerprintMode;

/// Default config file path, relative to the current working directory.
pub const DEFAULT_CONFIG_PATH: &str = "pollwatch.toml";

/// Default polling interval when neither the config file nor the CLI sets one.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [watch]
/// interval_ms = 500
/// include = ["src/**/*.rs"]
/// exclude = ["target/**"]
/// fingerprint = "content"
///
/// [run]
/// exec = "cargo check"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    /// Polling behaviour from `[watch]`.
    #[serde(default)]
    pub watch: WatchSection,

    /// Reaction behaviour from `[run]`.
    #[serde(default)]
    pub run: RunSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Polling interval in milliseconds. Must be >= 1.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Glob patterns a path must match to be tracked.
    ///
    /// Empty means every non-directory path is a candidate.
    #[serde(default)]
    pub include: Vec<String>,

    /// Glob patterns that remove a path from tracking, even when it matches
    /// an include pattern.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// `"metadata"` (default) or `"content"`.
    #[serde(default)]
    pub fingerprint: FingerprintMode,
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL.as_millis() as u64
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            include: Vec::new(),
            exclude: Vec::new(),
            fingerprint: FingerprintMode::default(),
        }
    }
}

/// `[run]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RunSection {
    /// Shell command executed after each detected change.
    #[serde(default)]
    pub exec: Option<String>,
}

/// Immutable watcher configuration, frozen at construction.
///
/// This is what [`crate::watch::Watcher::new`] consumes; it is produced
/// either directly (library use) or by merging a [`ConfigFile`] with CLI
/// overrides (see [`crate::effective_config`]).
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Time between two polls. Must be strictly positive.
    pub interval: Duration,

    /// Include patterns; empty means no include gate.
    pub include: Vec<String>,

    /// Exclude patterns; an exclude match always wins.
    pub exclude: Vec<String>,

    /// Metadata-only or content-digest fingerprinting.
    pub fingerprint: FingerprintMode,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            include: Vec::new(),
            exclude: Vec::new(),
            fingerprint: FingerprintMode::default(),
        }
    }
}

impl WatchConfig {
    /// Lift the `[watch]` section of a config file into a `WatchConfig`.
    pub fn from_file(file: &ConfigFile) -> Self {
        Self {
            interval: Duration::from_millis(file.watch.interval_ms),
            include: file.watch.include.clone(),
            exclude: file.watch.exclude.clone(),
            fingerprint: file.watch.fingerprint,
        }
    }

    /// Check invariants that must hold before a watcher may be constructed.
    ///
    /// `Duration` cannot be negative, so a zero interval is the non-positive
    /// case here.
    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(PollwatchError::Config(
                "polling interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
