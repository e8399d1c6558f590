// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};

pub mod mock;

/// Metadata for a single filesystem entry, as observed at scan time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMeta {
    pub len: u64,
    pub modified: SystemTime,
    pub is_dir: bool,
}

/// Abstract filesystem interface.
///
/// The scanner only ever touches the filesystem through this trait, so tests
/// can substitute [`mock::MockFileSystem`] for full control over metadata,
/// contents and failures.
pub trait FileSystem: Send + Sync + Debug {
    fn metadata(&self, path: &Path) -> Result<FileMeta>;
    fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>>;

    /// Return a list of entries in a directory. Returns full paths.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn metadata(&self, path: &Path) -> Result<FileMeta> {
        let meta = fs::metadata(path).with_context(|| format!("reading metadata of {:?}", path))?;
        let modified = meta
            .modified()
            .with_context(|| format!("reading modification time of {:?}", path))?;
        Ok(FileMeta {
            len: meta.len(),
            modified,
            is_dir: meta.is_dir(),
        })
    }

    fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>> {
        let file = fs::File::open(path).with_context(|| format!("opening file {:?}", path))?;
        Ok(Box::new(file))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("reading dir {:?}", path))? {
            let entry = entry?;
            entries.push(entry.path());
        }
        Ok(entries)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        fs::canonicalize(path).with_context(|| format!("canonicalizing {:?}", path))
    }
}
