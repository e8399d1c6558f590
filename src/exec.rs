// src/exec.rs

//! Shell execution of the configured reaction command.

use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Run `cmd` through the platform shell and wait for it to finish.
///
/// stdout is logged line by line at info level, stderr at debug. A non-zero
/// exit status is logged but is not an error; only a spawn/wait failure is.
pub async fn run_shell(cmd: &str) -> Result<()> {
    info!(cmd = %cmd, "running command");

    // Build a shell command appropriate for the platform.
    let mut command = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    };

    command
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = command
        .spawn()
        .with_context(|| format!("spawning command '{cmd}'"))?;

    // Always consume stderr so buffers don't fill; log at debug.
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(stream = "stderr", "{line}");
            }
        });
    }

    if let Some(stdout) = child.stdout.take() {
        let mut lines = BufReader::new(stdout).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            info!(stream = "stdout", "{line}");
        }
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for command '{cmd}'"))?;

    if status.success() {
        debug!(cmd = %cmd, "command completed");
    } else {
        warn!(cmd = %cmd, status = %status, "command exited with failure");
    }

    Ok(())
}
