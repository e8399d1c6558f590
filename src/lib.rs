// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, DEFAULT_CONFIG_PATH, WatchConfig, load_and_validate};
use crate::types::FingerprintMode;
use crate::watch::Watcher;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI overrides)
/// - the poll watcher
/// - the reaction loop (log each change, optionally run a command)
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let file_cfg = load_config(&args)?;
    let watch_cfg = effective_config(&args, &file_cfg);
    let exec_cmd = args.exec.clone().or_else(|| file_cfg.run.exec.clone());

    let mut watcher = Watcher::new(args.path.clone(), watch_cfg)?;

    tokio::select! {
        _ = watch_events(&mut watcher, exec_cmd.as_deref()) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("received Ctrl-C, stopping watcher");
        }
    }

    watcher.stop();
    Ok(())
}

/// Resolve the config file: `--config` is authoritative, otherwise the
/// default path is used when present, otherwise built-in defaults.
fn load_config(args: &CliArgs) -> Result<ConfigFile> {
    match &args.config {
        Some(path) => Ok(load_and_validate(path)?),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                Ok(load_and_validate(default)?)
            } else {
                Ok(ConfigFile::default())
            }
        }
    }
}

/// Merge the config file's `[watch]` section with CLI overrides.
///
/// CLI pattern lists *replace* the file's lists rather than appending, so a
/// flag can always narrow a broad file config.
pub fn effective_config(args: &CliArgs, file: &ConfigFile) -> WatchConfig {
    let mut cfg = WatchConfig::from_file(file);

    if let Some(ms) = args.interval_ms {
        cfg.interval = Duration::from_millis(ms);
    }
    if !args.include.is_empty() {
        cfg.include = args.include.clone();
    }
    if !args.exclude.is_empty() {
        cfg.exclude = args.exclude.clone();
    }
    if args.content_hash {
        cfg.fingerprint = FingerprintMode::Content;
    }

    cfg
}

/// Drain the watcher's channels until they close.
async fn watch_events(watcher: &mut Watcher, exec_cmd: Option<&str>) {
    loop {
        tokio::select! {
            change = watcher.changes.recv() => match change {
                Some(()) => {
                    info!("change detected");
                    if let Some(cmd) = exec_cmd {
                        if let Err(err) = exec::run_shell(cmd).await {
                            error!(error = %err, "command failed");
                        }
                    }
                }
                None => break,
            },
            err = watcher.errors.recv() => match err {
                Some(err) => {
                    warn!(error = %err, "scan failed; keeping previous snapshot");
                }
                None => break,
            },
        }
    }
}
