//! Generated file tracking
//!
//! [`FileTracker`] records every document a job writes, keyed by its path
//! relative to the job directory, and keeps page and byte totals current as
//! files are added.

use crate::core::verification::checksum::checksum_file;
use crate::domain::{Result, RollError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path};

/// What was recorded about one generated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Page count reported by the renderer
    pub n_pages: u32,

    /// Size in bytes, read back from disk
    pub size: u64,

    /// SHA-256 of the file contents, hex encoded
    pub hash: String,
}

/// Relative-path to [`FileRecord`] map with running totals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTracker {
    files: BTreeMap<String, FileRecord>,
    n_pages: u64,
    n_bytes: u64,
}

impl FileTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file under `relative_path`
    ///
    /// Recording the same path twice replaces the earlier record and its
    /// contribution to the totals.
    pub fn add(&mut self, relative_path: impl Into<String>, record: FileRecord) {
        self.n_pages += u64::from(record.n_pages);
        self.n_bytes += record.size;
        if let Some(previous) = self.files.insert(relative_path.into(), record) {
            self.n_pages -= u64::from(previous.n_pages);
            self.n_bytes -= previous.size;
        }
    }

    /// Read back a written file and record it
    ///
    /// The size and hash come from the file on disk. The key is the path
    /// relative to `job_root` with `/` separators, so the job directory can be
    /// moved without invalidating the manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not inside `job_root` or cannot be read.
    pub fn record_file(&mut self, job_root: &Path, path: &Path, n_pages: u32) -> Result<()> {
        let relative_path = relative_key(job_root, path)?;
        let (hash, size) = checksum_file(path)?;
        self.add(relative_path, FileRecord { n_pages, size, hash });
        Ok(())
    }

    /// Fold another tracker into this one
    pub fn merge(&mut self, shard: FileTracker) {
        for (path, record) in shard.files {
            self.add(path, record);
        }
    }

    /// Number of files recorded
    pub fn n_files(&self) -> usize {
        self.files.len()
    }

    /// Total pages across all files
    pub fn n_pages(&self) -> u64 {
        self.n_pages
    }

    /// Total bytes across all files
    pub fn n_bytes(&self) -> u64 {
        self.n_bytes
    }

    /// The recorded files
    pub fn files(&self) -> &BTreeMap<String, FileRecord> {
        &self.files
    }

    /// Consume the tracker and return the recorded files
    pub fn into_files(self) -> BTreeMap<String, FileRecord> {
        self.files
    }
}

/// Path of `path` relative to `root`, joined with `/`
///
/// # Errors
///
/// Returns an error if `path` does not lie under `root`.
pub fn relative_key(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        RollError::Other(format!(
            "{} is not inside the job directory {}",
            path.display(),
            root.display()
        ))
    })?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Ok(parts.join("/"))
}
