//! # File I/O Module
//!
//! JSON file helpers shared by the settings store and the quote log:
//! - **Atomic writes**: Write to .tmp, sync, rename to prevent torn files
//! - **File locking**: Serialize read-modify-write cycles across processes
//!
//! ## Locking
//!
//! A lock on `quotes.json` is held on the sidecar `quotes.json.lock`. The
//! sidecar is never deleted, so every process contends on the same inode.
//! Holder metadata is written into it for whoever is left waiting.
//!
//! ## Example
//!
//! ```rust,no_run
//! use quote_core::file_io::{write_json_atomic, FileLock};
//! use std::path::Path;
//!
//! let path = Path::new("quotes.json");
//!
//! // Blocks until no other writer holds the lock
//! let lock = FileLock::acquire(path, "sales@example.com").unwrap();
//! write_json_atomic(&Vec::<u32>::new(), path).unwrap();
//!
//! // Lock is released when dropped
//! drop(lock);
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, QuoteResult};

/// Lock holder metadata written into the .lock file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// Who asked for the lock (user or service name)
    pub holder: String,
    /// Machine name where lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create new lock info for the current process
    pub fn new(holder: impl Into<String>) -> Self {
        LockInfo {
            holder: holder.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }
}

/// Get the hostname of the current machine
fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

/// Exclusive lock guard over a data file. Released when dropped.
pub struct FileLock {
    /// Path to the guarded data file
    target_path: PathBuf,
    /// The underlying lock file handle (keeps OS lock)
    _lock_file: File,
    /// Lock metadata
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a data file, waiting for other holders.
    ///
    /// The wait is unbounded; writers hold the lock only for one
    /// read-modify-write of a small JSON file.
    pub fn acquire(path: &Path, holder: impl Into<String>) -> QuoteResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(holder);

        if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                QuoteError::file_error("create directory", parent.display().to_string(), e.to_string())
            })?;
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| {
                QuoteError::file_error("create lock", lock_path.display().to_string(), e.to_string())
            })?;

        lock_file.lock_exclusive().map_err(|e| {
            QuoteError::file_error("acquire lock", lock_path.display().to_string(), e.to_string())
        })?;

        // Only the holder writes, so truncating here cannot race
        let lock_json = serde_json::to_string_pretty(&info)?;
        lock_file
            .set_len(0)
            .and_then(|_| lock_file.write_all(lock_json.as_bytes()))
            .and_then(|_| lock_file.sync_all())
            .map_err(|e| {
                QuoteError::file_error("write lock", lock_path.display().to_string(), e.to_string())
            })?;

        tracing::debug!(path = %path.display(), holder = %info.holder, "acquired file lock");

        Ok(FileLock {
            target_path: path.to_path_buf(),
            _lock_file: lock_file,
            info,
        })
    }

    /// Get the path to the guarded data file
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }
}

/// Get the lock file path for a data file
pub fn lock_path_for(path: &Path) -> PathBuf {
    sibling_with_suffix(path, "lock")
}

/// `quotes.json` -> `quotes.json.<suffix>`
pub(crate) fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut sibling = path.to_path_buf();
    let extension = sibling
        .extension()
        .map(|e| format!("{}.{}", e.to_string_lossy(), suffix))
        .unwrap_or_else(|| suffix.to_string());
    sibling.set_extension(extension);
    sibling
}

/// Write a value as pretty JSON with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write to a temporary sibling file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename over the target (atomic on most filesystems)
pub fn write_json_atomic<T: Serialize + ?Sized>(value: &T, path: &Path) -> QuoteResult<()> {
    let json = serde_json::to_string_pretty(value)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            QuoteError::file_error("create directory", parent.display().to_string(), e.to_string())
        })?;
    }

    let tmp_path = sibling_with_suffix(path, "tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        QuoteError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        QuoteError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        QuoteError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        QuoteError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Read a file to a string
pub fn read_to_string(path: &Path) -> QuoteResult<String> {
    let mut file = File::open(path).map_err(|e| {
        QuoteError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        QuoteError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    Ok(contents)
}

/// Read and parse a JSON file.
///
/// # Returns
///
/// * `Err(QuoteError::FileError)` - I/O error (including a missing file)
/// * `Err(QuoteError::SerializationError)` - Invalid JSON for `T`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> QuoteResult<T> {
    let contents = read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        QuoteError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_lock_path_generation() {
        let path = Path::new("/path/to/quotes.json");
        assert_eq!(lock_path_for(path), Path::new("/path/to/quotes.json.lock"));

        let bare = Path::new("/path/to/quotes");
        assert_eq!(lock_path_for(bare), Path::new("/path/to/quotes.lock"));
    }

    #[test]
    fn test_lock_info_creation() {
        let info = LockInfo::new("sales@example.com");
        assert_eq!(info.holder, "sales@example.com");
        assert!(info.pid > 0);
    }

    #[test]
    fn test_lock_writes_holder_info() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quotes.json");

        let lock = FileLock::acquire(&path, "tester").unwrap();
        assert_eq!(lock.target_path(), path.as_path());

        let info: LockInfo = read_json(&lock_path_for(&path)).unwrap();
        assert_eq!(info.holder, "tester");
        drop(lock);

        // Lock can be taken again once released
        let again = FileLock::acquire(&path, "second").unwrap();
        assert_eq!(again.info.holder, "second");
    }

    #[test]
    fn test_atomic_write_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("items.json");

        write_json_atomic(&vec!["a", "b"], &path).unwrap();

        let loaded: Vec<String> = read_json(&path).unwrap();
        assert_eq!(loaded, vec!["a", "b"]);
        assert!(!sibling_with_suffix(&path, "tmp").exists());
    }

    #[test]
    fn test_read_json_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = read_json::<Vec<u32>>(&missing).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{not json").unwrap();
        let err = read_json::<Vec<u32>>(&bad).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
