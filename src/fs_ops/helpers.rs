//! I/O error text helpers.
//!
//! Per-file failures are reported to callers as plain strings, so the
//! message built here is what ends up in `FileFailure::error_message`.
//!
//! Usage:
//!   let msg = describe_io_error("move", src, &e);

use std::io;
use std::path::Path;

/// Short, platform-aware hint for common OS error codes.
fn hint(e: &io::Error) -> Option<&'static str> {
    #[cfg(unix)]
    if let Some(code) = e.raw_os_error() {
        let h = match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
            libc::EXDEV => Some("cross-filesystem; atomic rename not possible"),
            libc::EBUSY => Some("resource busy; ensure no other process is writing"),
            libc::ENOENT => Some("path not found; it may have been moved or deleted"),
            libc::ENOSPC => Some("insufficient space on device"),
            libc::EROFS => Some("read-only filesystem"),
            libc::EISDIR => Some("destination is a directory"),
            libc::ENAMETOOLONG => Some("filename or path too long"),
            _ => None,
        };
        if h.is_some() {
            return h;
        }
    }
    #[cfg(windows)]
    if let Some(code) = e.raw_os_error() {
        let h = match code {
            5 => Some("access denied; check permissions"),
            17 => Some("not same device; cross-filesystem move"),
            32 => Some("sharing violation; file is in use"),
            2 | 3 => Some("path not found; it may have been moved or deleted"),
            112 => Some("insufficient disk space"),
            _ => None,
        };
        if h.is_some() {
            return h;
        }
    }
    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; it may have been moved or deleted"),
        _ => None,
    }
}

/// Format `op 'path': error (hint)`.
pub(crate) fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    match hint(e) {
        Some(h) => format!("{} '{}': {} ({})", op, path.display(), e, h),
        None => format!("{} '{}': {}", op, path.display(), e),
    }
}
