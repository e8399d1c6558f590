// src/watch/filter.rs

use std::fmt;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::errors::Result;

/// Compiled include/exclude glob patterns.
///
/// The patterns are evaluated against paths relative to the watch root, with
/// forward slashes (e.g. `"src/main.rs"`). Directories never reach the
/// filter; the scanner traverses them unconditionally.
#[derive(Clone)]
pub struct PathFilter {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl fmt::Debug for PathFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathFilter")
            .field("has_include", &self.include.is_some())
            .field("has_exclude", &self.exclude.is_some())
            .finish()
    }
}

impl PathFilter {
    /// Compile both pattern lists. An empty list compiles to "no gate" rather
    /// than an empty `GlobSet` (which would match nothing).
    ///
    /// A malformed pattern fails here, at construction, so a running watcher
    /// can never hit a pattern error mid-scan.
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: build_globset(include)?,
            exclude: build_globset(exclude)?,
        })
    }

    /// Returns true if a file at `rel_path` should be tracked.
    ///
    /// - With include patterns configured, the path must match at least one.
    /// - An exclude match wins regardless of include results.
    /// - With both lists empty, everything is tracked.
    pub fn should_track(&self, rel_path: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.is_match(rel_path) {
                return false;
            }
        }
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(rel_path) {
                return false;
            }
        }
        true
    }
}

/// Build a GlobSet from simple string patterns; `None` for an empty list.
fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(Glob::new(pat)?);
    }
    Ok(Some(builder.build()?))
}
