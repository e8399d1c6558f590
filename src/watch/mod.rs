// src/watch/mod.rs

//! Polling change detection.
//!
//! This module is responsible for:
//! - Deciding which paths are tracked (`filter`, include/exclude globs).
//! - Reducing a file to a comparable fingerprint (`fingerprint`, metadata
//!   with an optional BLAKE3 content digest).
//! - Walking the watch root into a [`Snapshot`] and diffing successive
//!   snapshots (`snapshot`).
//! - Driving the scan-and-compare cycle on a timer and delivering
//!   notifications (`watcher`).
//!
//! It does **not** know what a change *means*; it only signals that the set
//! of tracked files, or their content, differs from the previous poll.

pub mod filter;
pub mod fingerprint;
pub mod snapshot;
pub mod watcher;

pub use filter::PathFilter;
pub use fingerprint::{FileRecord, Fingerprinter};
pub use snapshot::{Scanner, Snapshot, snapshots_differ};
pub use watcher::Watcher;
