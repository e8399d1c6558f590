mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::fs;
use std::time::Duration;

use tempfile::tempdir;
use tokio::time::{sleep, timeout};

use pollwatch::config::WatchConfig;
use pollwatch::watch::Watcher;

type TestResult = Result<(), Box<dyn Error>>;

const TICK: Duration = Duration::from_millis(50);

/// Long enough for several ticks to fire.
const SETTLE: Duration = Duration::from_millis(250);

/// Upper bound for "a notification should arrive".
const WAIT: Duration = Duration::from_secs(3);

fn fast_config() -> WatchConfig {
    WatchConfig {
        interval: TICK,
        ..WatchConfig::default()
    }
}

#[tokio::test]
async fn first_scan_never_notifies() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    fs::write(dir.path().join("a.txt"), "alpha")?;
    fs::write(dir.path().join("b.txt"), "beta")?;

    let mut watcher = Watcher::new(dir.path(), fast_config())?;

    // The baseline scan and several follow-ups run in this window; none of
    // them may produce a notification for an untouched directory.
    let res = timeout(SETTLE, watcher.changes.recv()).await;
    assert!(res.is_err(), "baseline scan must not notify");

    watcher.stop();
    Ok(())
}

#[tokio::test]
async fn unchanged_tree_stays_silent_in_both_modes() -> TestResult {
    init_tracing();

    for content_hash in [false, true] {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.txt"), "alpha")?;
        fs::create_dir(dir.path().join("sub"))?;
        fs::write(dir.path().join("sub/b.txt"), "beta")?;

        let mut config = fast_config();
        if content_hash {
            config.fingerprint = pollwatch::types::FingerprintMode::Content;
        }

        let mut watcher = Watcher::new(dir.path(), config)?;
        let res = timeout(SETTLE, watcher.changes.recv()).await;
        assert!(
            res.is_err(),
            "no notification expected for an unchanged tree (content_hash = {content_hash})"
        );
        watcher.stop();
    }
    Ok(())
}

#[tokio::test]
async fn added_file_is_detected() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    fs::write(dir.path().join("existing.txt"), "old")?;

    let mut watcher = Watcher::new(dir.path(), fast_config())?;
    sleep(SETTLE).await; // let the baseline be established

    fs::write(dir.path().join("fresh.txt"), "new file")?;

    timeout(WAIT, watcher.changes.recv())
        .await
        .expect("change notification expected after adding a file")
        .expect("channel unexpectedly closed");

    watcher.stop();
    Ok(())
}

#[tokio::test]
async fn deleted_file_is_detected() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let doomed = dir.path().join("doomed.txt");
    fs::write(&doomed, "short-lived")?;

    let mut watcher = Watcher::new(dir.path(), fast_config())?;
    sleep(SETTLE).await;

    fs::remove_file(&doomed)?;

    timeout(WAIT, watcher.changes.recv())
        .await
        .expect("change notification expected after deleting a file")
        .expect("channel unexpectedly closed");

    watcher.stop();
    Ok(())
}

#[tokio::test]
async fn modified_file_is_detected() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let target = dir.path().join("notes.md");
    fs::write(&target, "v1")?;

    let mut watcher = Watcher::new(dir.path(), fast_config())?;
    sleep(SETTLE).await;

    fs::write(&target, "v2 with more text")?;

    timeout(WAIT, watcher.changes.recv())
        .await
        .expect("change notification expected after modifying a file")
        .expect("channel unexpectedly closed");

    watcher.stop();
    Ok(())
}

#[tokio::test]
async fn filtered_out_file_does_not_notify() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    fs::write(dir.path().join("main.rs"), "fn main() {}")?;

    let config = WatchConfig {
        interval: TICK,
        include: vec!["**/*.rs".to_string()],
        ..WatchConfig::default()
    };
    let mut watcher = Watcher::new(dir.path(), config)?;
    sleep(SETTLE).await;

    // Not matched by the include list, so invisible to the watcher.
    fs::write(dir.path().join("scratch.log"), "noise")?;

    let res = timeout(SETTLE, watcher.changes.recv()).await;
    assert!(res.is_err(), "untracked file must not notify");

    watcher.stop();
    Ok(())
}

#[tokio::test]
async fn single_file_root_is_watched() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let target = dir.path().join("watched.txt");
    fs::write(&target, "v1")?;

    let mut watcher = Watcher::new(&target, fast_config())?;
    sleep(SETTLE).await;

    fs::write(&target, "v2 - longer than before")?;

    timeout(WAIT, watcher.changes.recv())
        .await
        .expect("change notification expected for a single-file root")
        .expect("channel unexpectedly closed");

    watcher.stop();
    Ok(())
}
