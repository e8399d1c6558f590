// src/watch/snapshot.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, warn};

use crate::fs::FileSystem;
use crate::watch::filter::PathFilter;
use crate::watch::fingerprint::{FileRecord, Fingerprinter};

/// The complete set of fingerprinted files observed during one scan.
///
/// Keys are root-relative paths with forward slashes. Snapshots are
/// value-like: comparing two snapshots never mutates either.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    files: HashMap<String, FileRecord>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn insert(&mut self, path: impl Into<String>, record: FileRecord) {
        self.files.insert(path.into(), record);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileRecord)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, FileRecord)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, FileRecord)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

/// Compare a new snapshot against the stored baseline.
///
/// `old = None` is the "no prior scan" sentinel: the very first scan never
/// reports a change. Pure function; order of the underlying maps is
/// irrelevant.
pub fn snapshots_differ(old: Option<&Snapshot>, new: &Snapshot) -> bool {
    let Some(old) = old else {
        return false; // Don't notify on the initial scan.
    };

    if new.len() != old.len() {
        return true;
    }

    // Check for new or modified files.
    for (path, record) in new.iter() {
        match old.get(path) {
            None => return true,
            Some(existing) if existing != record => return true,
            Some(_) => {}
        }
    }

    // Check for deleted files.
    for path in old.paths() {
        if !new.contains(path) {
            return true;
        }
    }

    false
}

/// Walks the watch root and builds one [`Snapshot`] per call.
///
/// Every call allocates a fresh map; a scanner never reuses or mutates a
/// previously returned snapshot. Any traversal, metadata or fingerprint error
/// aborts the walk with `Err` so a partial snapshot is never published.
#[derive(Debug)]
pub struct Scanner {
    root: PathBuf,
    filter: PathFilter,
    fingerprinter: Fingerprinter,
    fs: Arc<dyn FileSystem>,
}

impl Scanner {
    pub fn new(
        root: impl Into<PathBuf>,
        filter: PathFilter,
        fingerprinter: Fingerprinter,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        let root = root.into();
        // Canonicalize once so we have a stable base path.
        let root = fs.canonicalize(&root).unwrap_or(root);
        Self {
            root,
            filter,
            fingerprinter,
            fs,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Perform a full traversal of the root and fingerprint every tracked
    /// file.
    pub fn scan(&self) -> Result<Snapshot> {
        let root_meta = self
            .fs
            .metadata(&self.root)
            .with_context(|| format!("scanning watch root {:?}", self.root))?;

        let mut snapshot = Snapshot::default();

        // A plain-file root yields at most one record, keyed by its file name.
        if !root_meta.is_dir {
            let name = self
                .root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| anyhow!("watch root {:?} has no file name", self.root))?;

            if self.filter.should_track(&name) {
                if let Some(record) = self.fingerprinter.fingerprint(&self.root, &root_meta)? {
                    snapshot.insert(name, record);
                }
            }
            return Ok(snapshot);
        }

        let mut stack = vec![self.root.clone()];

        while let Some(dir) = stack.pop() {
            for path in self.fs.read_dir(&dir)? {
                let meta = self
                    .fs
                    .metadata(&path)
                    .with_context(|| format!("scanning {:?}", path))?;

                if meta.is_dir {
                    stack.push(path);
                    continue;
                }

                let Some(rel) = relative_str(&self.root, &path) else {
                    warn!("could not relativize {:?} against root {:?}", path, self.root);
                    continue;
                };

                if !self.filter.should_track(&rel) {
                    continue;
                }

                if let Some(record) = self.fingerprinter.fingerprint(&path, &meta)? {
                    snapshot.insert(rel, record);
                }
            }
        }

        debug!(files = snapshot.len(), root = ?self.root, "scan complete");
        Ok(snapshot)
    }
}

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// Returns `None` if the path is not under `root`.
fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let s = rel.to_string_lossy().replace('\\', "/");
    Some(s)
}
