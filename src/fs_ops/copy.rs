//! Cross-device fallback: copy into a hidden temp file next to the
//! destination, fsync it, rename it over the destination, then drop the source.

use std::fs::{self, File};
use std::path::Path;

use super::atomic::try_atomic_move;
use super::helpers::describe_io_error;
use super::util;

/// Copy `src` to `dest` via a temp file, then remove `src`.
/// Errors carry the failing step and path.
pub(super) fn copy_then_remove(src: &Path, dest: &Path) -> Result<(), String> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| format!("destination has no parent: {}", dest.display()))?;
    let tmp_path = util::unique_temp_path(dest_dir);

    let staged = fs::copy(src, &tmp_path)
        .and_then(|_| File::open(&tmp_path)?.sync_all())
        .map_err(|e| describe_io_error("copy to temporary file", &tmp_path, &e));
    if let Err(msg) = staged {
        let _ = fs::remove_file(&tmp_path);
        return Err(msg);
    }

    if let Err(e) = try_atomic_move(&tmp_path, dest) {
        let _ = fs::remove_file(&tmp_path);
        return Err(describe_io_error("rename temporary file", dest, &e));
    }

    fs::remove_file(src).map_err(|e| describe_io_error("remove original file", src, &e))
}
