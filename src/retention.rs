//! Log file retention management
//!
//! Keeps the N most-recently-modified files matching the logger's naming
//! prefix and deletes the rest. Runs once, synchronously, when a logger is
//! constructed.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{LoggerError, Result};

/// Prefix shared by every file the logger creates
///
/// Pruning matches on the prefix alone, not the `.txt` suffix, so sibling
/// files like `log_old.gz` in the same directory are candidates too.
pub const LOG_FILE_PREFIX: &str = "log_";

/// Delete log files beyond the retention count
///
/// Candidates are all files in `directory` whose name starts with
/// [`LOG_FILE_PREFIX`], ordered by modification time (most recent first) with
/// ties broken by filename ascending. The first `retained` entries survive;
/// everything after them is removed. Returns the number of files deleted.
pub fn remove_obsolete_logfiles(directory: &Path, retained: usize) -> Result<usize> {
    if !directory.exists() {
        return Ok(0);
    }

    let mut candidates: Vec<(PathBuf, String, SystemTime)> = Vec::new();

    let entries = fs::read_dir(directory).map_err(|source| LoggerError::Directory {
        path: directory.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| LoggerError::Directory {
            path: directory.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) if name.starts_with(LOG_FILE_PREFIX) => name.to_string(),
            _ => continue,
        };

        // Files whose mtime cannot be read sort as oldest
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        candidates.push((path, name, modified));
    }

    // Most recent first; equal timestamps fall back to filename order
    candidates.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.1.cmp(&b.1)));

    let mut deleted = 0;
    for (path, _, _) in candidates.iter().skip(retained) {
        if fs::remove_file(path).is_ok() {
            deleted += 1;
        }
    }

    if deleted > 0 {
        tracing::debug!(directory = %directory.display(), deleted, "pruned old log files");
    }

    Ok(deleted)
}
