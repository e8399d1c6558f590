// src/watch/fingerprint.rs

use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::{Context, Result};
use blake3::Hasher;

use crate::fs::{FileMeta, FileSystem};
use crate::types::FingerprintMode;

/// The comparable state of one tracked file at a moment in time.
///
/// The file's path is not stored here; it is the key of the snapshot map a
/// record lives in. Records are immutable: a later scan produces a new record
/// rather than mutating an old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub size: u64,
    pub mod_time: SystemTime,

    /// BLAKE3 hex digest of the contents; present only in
    /// [`FingerprintMode::Content`].
    pub digest: Option<String>,
}

/// Converts filesystem entries into [`FileRecord`]s.
#[derive(Debug, Clone)]
pub struct Fingerprinter {
    mode: FingerprintMode,
    fs: Arc<dyn FileSystem>,
}

impl Fingerprinter {
    pub fn new(mode: FingerprintMode, fs: Arc<dyn FileSystem>) -> Self {
        Self { mode, fs }
    }

    pub fn mode(&self) -> FingerprintMode {
        self.mode
    }

    /// Produce a record for the entry at `path`, or `None` for directories.
    ///
    /// In content mode an open or read failure propagates; the caller aborts
    /// the whole scan, since partial snapshots are never published.
    pub fn fingerprint(&self, path: &Path, meta: &FileMeta) -> Result<Option<FileRecord>> {
        if meta.is_dir {
            return Ok(None);
        }

        let digest = match self.mode {
            FingerprintMode::Metadata => None,
            FingerprintMode::Content => Some(self.digest_file(path)?),
        };

        Ok(Some(FileRecord {
            size: meta.len,
            mod_time: meta.modified,
            digest,
        }))
    }

    /// Stream the file through BLAKE3 in fixed-size chunks.
    fn digest_file(&self, path: &Path) -> Result<String> {
        let mut reader = self
            .fs
            .open_read(path)
            .with_context(|| format!("opening file for fingerprinting: {:?}", path))?;

        let mut hasher = Hasher::new();
        let mut buf = [0u8; 8192];
        loop {
            let n = reader
                .read(&mut buf)
                .with_context(|| format!("reading file for fingerprinting: {:?}", path))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }

        Ok(hasher.finalize().to_hex().to_string())
    }
}
