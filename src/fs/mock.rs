// src/fs/mock.rs

use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use anyhow::{Result, anyhow};

use super::{FileMeta, FileSystem};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File { data: Vec<u8>, mtime: SystemTime },
    Dir(Vec<String>), // List of child names
}

/// In-memory filesystem for tests.
///
/// Beyond basic file/directory storage it supports two things the real
/// filesystem makes awkward in tests:
/// - explicit modification times, so a content change can preserve size and
///   mtime;
/// - per-path fault injection via [`MockFileSystem::fail_on`], so a scan can
///   be made to fail deterministically.
///
/// Clones share the same underlying state, so a test can keep one handle
/// while the watcher owns another.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<PathBuf, MockEntry>,
    failing: HashSet<PathBuf>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        // Ensure root exists
        entries.insert(PathBuf::from("."), MockEntry::Dir(Vec::new()));

        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries,
                failing: HashSet::new(),
            })),
        }
    }

    /// Insert or replace a file, stamping it with the current wall clock.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.add_file_with_mtime(path, content, SystemTime::now());
    }

    /// Insert or replace a file with an explicit modification time.
    pub fn add_file_with_mtime(
        &self,
        path: impl AsRef<Path>,
        content: impl Into<Vec<u8>>,
        mtime: SystemTime,
    ) {
        let path = path.as_ref().to_path_buf();
        let mut inner = self.inner.lock().unwrap();
        inner.entries.insert(
            path.clone(),
            MockEntry::File {
                data: content.into(),
                mtime,
            },
        );

        // Ensure parent directories exist implicitly for simplicity in this mock
        if let Some(parent) = path.parent() {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };

            ensure_dir_entry(&mut inner.entries, parent);
            // Add this file to parent's children
            if let Some(MockEntry::Dir(children)) = inner.entries.get_mut(parent) {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    if !children.contains(&name.to_string()) {
                        children.push(name.to_string());
                    }
                }
            }
        }
    }

    /// Create an empty directory (and its ancestors).
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut inner = self.inner.lock().unwrap();
        ensure_dir_entry(&mut inner.entries, path.as_ref());
    }

    /// Remove a file, detaching it from its parent directory.
    pub fn remove_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        let mut inner = self.inner.lock().unwrap();
        inner.entries.remove(&path);

        if let Some(parent) = path.parent() {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            if let Some(MockEntry::Dir(children)) = inner.entries.get_mut(parent) {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    children.retain(|c| c != name);
                }
            }
        }
    }

    /// Overwrite a file's modification time without touching its contents.
    pub fn set_mtime(&self, path: impl AsRef<Path>, mtime: SystemTime) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(MockEntry::File { mtime: m, .. }) = inner.entries.get_mut(path.as_ref()) {
            *m = mtime;
        }
    }

    /// Make every operation touching `path` fail until [`clear_failures`] is
    /// called.
    ///
    /// [`clear_failures`]: MockFileSystem::clear_failures
    pub fn fail_on(&self, path: impl AsRef<Path>) {
        let mut inner = self.inner.lock().unwrap();
        inner.failing.insert(path.as_ref().to_path_buf());
    }

    pub fn clear_failures(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.failing.clear();
    }

    fn check_failure(&self, inner: &Inner, path: &Path) -> Result<()> {
        if inner.failing.contains(path) {
            return Err(anyhow!("injected failure for {:?}", path));
        }
        Ok(())
    }
}

fn ensure_dir_entry(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
    if !entries.contains_key(path) {
        entries.insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
        if let Some(parent) = path.parent() {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };

            if parent != path {
                // Avoid infinite loop at root
                ensure_dir_entry(entries, parent);
                // Add this dir to parent's children
                if let Some(MockEntry::Dir(children)) = entries.get_mut(parent) {
                    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                        if !children.contains(&name.to_string()) {
                            children.push(name.to_string());
                        }
                    }
                }
            }
        }
    }
}

impl FileSystem for MockFileSystem {
    fn metadata(&self, path: &Path) -> Result<FileMeta> {
        let inner = self.inner.lock().unwrap();
        self.check_failure(&inner, path)?;
        match inner.entries.get(path) {
            Some(MockEntry::File { data, mtime }) => Ok(FileMeta {
                len: data.len() as u64,
                modified: *mtime,
                is_dir: false,
            }),
            Some(MockEntry::Dir(_)) => Ok(FileMeta {
                len: 0,
                modified: SystemTime::UNIX_EPOCH,
                is_dir: true,
            }),
            None => Err(anyhow!("no such entry: {:?}", path)),
        }
    }

    fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>> {
        let inner = self.inner.lock().unwrap();
        self.check_failure(&inner, path)?;
        match inner.entries.get(path) {
            Some(MockEntry::File { data, .. }) => Ok(Box::new(Cursor::new(data.clone()))),
            Some(MockEntry::Dir(_)) => Err(anyhow!("is a directory: {:?}", path)),
            None => Err(anyhow!("no such file: {:?}", path)),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let inner = self.inner.lock().unwrap();
        self.check_failure(&inner, path)?;
        match inner.entries.get(path) {
            Some(MockEntry::Dir(children)) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            _ => Err(anyhow!("not a directory or not found: {:?}", path)),
        }
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        // In mock, we just return the path as is, assuming stable paths are used in tests
        Ok(path.to_path_buf())
    }
}
