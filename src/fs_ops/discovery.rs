//! Candidate discovery in the staging directory.
//! Lists regular files one level deep whose name starts with a literal prefix.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::errors::FileSystemError;

/// Return staged files in `staging_dir` whose name starts with `prefix`.
///
/// - Missing `staging_dir` is not an error: nothing has been staged yet.
/// - No recursion; symlinks, directories and special files are skipped.
/// - Matching is case-sensitive and byte-wise.
/// - Order is whatever the filesystem yields.
pub fn list_by_prefix(staging_dir: &Path, prefix: &str) -> Result<Vec<PathBuf>, FileSystemError> {
    if prefix.is_empty() {
        return Err(FileSystemError::EmptyPrefix);
    }

    match fs::metadata(staging_dir) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %staging_dir.display(), "tmp folder does not exist");
            return Ok(Vec::new());
        }
        Ok(meta) if !meta.is_dir() => {
            return Err(FileSystemError::StagingNotDirectory {
                path: staging_dir.to_path_buf(),
                prefix: prefix.to_string(),
            });
        }
        // Other stat failures resurface from the walk below with full context.
        _ => {}
    }

    let mut matching = Vec::new();
    for entry in WalkDir::new(staging_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = match entry {
            Ok(entry) => entry,
            // Depth 0 means the directory itself could not be read.
            Err(e) if e.depth() == 0 => {
                return Err(FileSystemError::ListStaging {
                    path: staging_dir.to_path_buf(),
                    prefix: prefix.to_string(),
                    source: e,
                });
            }
            Err(e) => {
                debug!(error = %e, "skipping unreadable staging entry");
                continue;
            }
        };

        if entry.file_type().is_file() && name_has_prefix(entry.file_name(), prefix) {
            matching.push(entry.into_path());
        }
    }

    info!(prefix, count = matching.len(), "listed staged files");
    Ok(matching)
}

#[cfg(unix)]
fn name_has_prefix(name: &OsStr, prefix: &str) -> bool {
    use std::os::unix::ffi::OsStrExt;
    name.as_bytes().starts_with(prefix.as_bytes())
}

#[cfg(not(unix))]
fn name_has_prefix(name: &OsStr, prefix: &str) -> bool {
    name.to_string_lossy().starts_with(prefix)
}
