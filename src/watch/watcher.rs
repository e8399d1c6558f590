// src/watch/watcher.rs

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::WatchConfig;
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::FingerprintMode;
use crate::watch::filter::PathFilter;
use crate::watch::fingerprint::Fingerprinter;
use crate::watch::snapshot::{Scanner, Snapshot, snapshots_differ};

/// A polling file watcher.
///
/// Construction spawns a background task that re-scans the watch root on a
/// fixed interval and compares each snapshot against the previous one. Both
/// delivery channels have capacity one and are fed with `try_send`: the
/// producer never blocks, and undelivered notifications coalesce into the
/// single buffered slot. Once [`Watcher::stop`] is called (or the watcher is
/// dropped), both receivers yield `None`.
///
/// Must be constructed from within a tokio runtime.
#[derive(Debug)]
pub struct Watcher {
    /// Yields one unit value per detected change.
    pub changes: mpsc::Receiver<()>,

    /// Yields scan failures. A failed scan leaves the stored snapshot
    /// untouched and polling continues on the next tick.
    pub errors: mpsc::Receiver<anyhow::Error>,

    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl Watcher {
    /// Create a watcher over `root` backed by the real filesystem.
    ///
    /// Fails on a zero interval or a malformed include/exclude pattern; a
    /// watcher is never constructed in an invalid state.
    pub fn new(root: impl Into<PathBuf>, config: WatchConfig) -> Result<Self> {
        Self::with_fs(root, config, Arc::new(RealFileSystem))
    }

    /// Create a watcher over `root` backed by an arbitrary [`FileSystem`].
    pub fn with_fs(
        root: impl Into<PathBuf>,
        config: WatchConfig,
        fs: Arc<dyn FileSystem>,
    ) -> Result<Self> {
        config.validate()?;

        let filter = PathFilter::new(&config.include, &config.exclude)?;
        let fingerprinter = Fingerprinter::new(config.fingerprint, Arc::clone(&fs));
        let scanner = Arc::new(Scanner::new(root, filter, fingerprinter, fs));

        let (change_tx, changes) = mpsc::channel::<()>(1);
        let (err_tx, errors) = mpsc::channel::<anyhow::Error>(1);
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        info!(
            root = ?scanner.root(),
            interval = ?config.interval,
            content_digest = matches!(config.fingerprint, FingerprintMode::Content),
            "poll watcher started"
        );

        let task = tokio::spawn(poll_loop(
            scanner,
            config.interval,
            change_tx,
            err_tx,
            stop_rx,
        ));

        Ok(Self {
            changes,
            errors,
            stop: Some(stop_tx),
            task,
        })
    }

    /// Stop polling and close both delivery channels.
    ///
    /// Idempotent. The signal is sent synchronously; an in-flight scan still
    /// completes before the background task exits, after which both receivers
    /// observe closure.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            debug!("stopping poll watcher");
            let _ = stop.send(());
        }
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        // Backstop so the poll task never outlives its handle.
        self.task.abort();
    }
}

/// The watcher's background loop: one tick = one scan-and-compare cycle.
///
/// The previous snapshot is owned exclusively here; observers only ever see
/// the unit change events, never snapshot data.
async fn poll_loop(
    scanner: Arc<Scanner>,
    interval: Duration,
    change_tx: mpsc::Sender<()>,
    err_tx: mpsc::Sender<anyhow::Error>,
    mut stop_rx: oneshot::Receiver<()>,
) {
    // First tick fires one full interval after construction, and ticks never
    // pile up behind a slow scan.
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut previous: Option<Snapshot> = None;

    loop {
        tokio::select! {
            _ = &mut stop_rx => break,
            _ = ticker.tick() => {
                let scanner = Arc::clone(&scanner);
                let result = tokio::task::spawn_blocking(move || scanner.scan()).await;

                match result {
                    Ok(Ok(snapshot)) => {
                        if snapshots_differ(previous.as_ref(), &snapshot) {
                            debug!(files = snapshot.len(), "change detected");
                            // Best effort: a full slot or absent receiver
                            // coalesces with the pending notification.
                            let _ = change_tx.try_send(());
                        }
                        // Set to latest _after_ checking if we had changes.
                        previous = Some(snapshot);
                    }
                    Ok(Err(err)) => {
                        // Keep the last known-good snapshot; the next
                        // successful scan diffs against it.
                        let _ = err_tx.try_send(err);
                    }
                    Err(join_err) => {
                        let _ = err_tx.try_send(anyhow!("scan task failed: {join_err}"));
                    }
                }
            }
        }
    }

    debug!("poll loop finished");
}
