mod common;
use crate::common::init_tracing;

use std::error::Error;

use pollwatch::config::WatchConfig;
use pollwatch::errors::PollwatchError;
use pollwatch::watch::{PathFilter, Watcher};

type TestResult = Result<(), Box<dyn Error>>;

fn patterns(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn empty_filter_tracks_everything() -> TestResult {
    init_tracing();

    let filter = PathFilter::new(&[], &[])?;
    assert!(filter.should_track("a.txt"));
    assert!(filter.should_track("deep/nested/path.rs"));
    Ok(())
}

#[test]
fn include_list_gates_tracking() -> TestResult {
    init_tracing();

    let filter = PathFilter::new(&patterns(&["src/**/*.rs", "*.toml"]), &[])?;
    assert!(filter.should_track("src/watch/filter.rs"));
    assert!(filter.should_track("Cargo.toml"));
    assert!(!filter.should_track("README.md"));
    assert!(!filter.should_track("docs/guide.rs.txt"));
    Ok(())
}

#[test]
fn exclude_list_removes_paths() -> TestResult {
    init_tracing();

    let filter = PathFilter::new(&[], &patterns(&["target/**", "**/*.tmp"]))?;
    assert!(filter.should_track("src/main.rs"));
    assert!(!filter.should_track("target/debug/build.log"));
    assert!(!filter.should_track("scratch/notes.tmp"));
    Ok(())
}

#[test]
fn exclude_wins_over_include() -> TestResult {
    init_tracing();

    let filter = PathFilter::new(
        &patterns(&["src/**/*.rs"]),
        &patterns(&["src/generated/**"]),
    )?;
    assert!(filter.should_track("src/lib.rs"));
    // Matches both lists; exclude has precedence.
    assert!(!filter.should_track("src/generated/bindings.rs"));
    Ok(())
}

#[test]
fn malformed_pattern_fails_at_construction() {
    init_tracing();

    let err = PathFilter::new(&patterns(&["src/[oops"]), &[]).unwrap_err();
    assert!(matches!(err, PollwatchError::Pattern(_)));
}

#[tokio::test]
async fn watcher_rejects_malformed_patterns() {
    init_tracing();

    let config = WatchConfig {
        exclude: vec!["[bad".to_string()],
        ..WatchConfig::default()
    };
    let err = Watcher::new(".", config).unwrap_err();
    assert!(matches!(err, PollwatchError::Pattern(_)));
}
