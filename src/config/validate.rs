// src/config/validate.rs

use crate::config::model::ConfigFile;
use crate::errors::{PollwatchError, Result};

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - `interval_ms >= 1`
/// - `exec`, if present, is not blank
///
/// It does **not** compile the glob patterns; that happens when the watcher
/// is constructed, where a malformed pattern also fails fast.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    if cfg.watch.interval_ms == 0 {
        return Err(PollwatchError::Config(
            "[watch].interval_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    if let Some(exec) = &cfg.run.exec {
        if exec.trim().is_empty() {
            return Err(PollwatchError::Config(
                "[run].exec must not be blank".to_string(),
            ));
        }
    }

    Ok(())
}
