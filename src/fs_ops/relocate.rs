//! Batch relocation into the publish directory.
//! Ensures the directory exists, then moves each file independently:
//! atomic rename first, copy+remove when the rename crosses filesystems.
//! A failed file is recorded and the batch carries on.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{error, info, warn};

use crate::errors::FileSystemError;
use crate::model::{OperationResult, ResultBuilder};

use super::atomic::try_atomic_move;
use super::copy::copy_then_remove;
use super::helpers::describe_io_error;
use super::util::is_cross_device;

/// Move every path in `files` into `publish_dir`, overwriting same-named files.
///
/// Fails as a whole only when `publish_dir` cannot be made available; in that
/// case no file is touched.
pub fn move_all<P: AsRef<Path>>(files: &[P], publish_dir: &Path) -> Result<OperationResult, FileSystemError> {
    ensure_publish_dir(publish_dir)?;

    let mut result = ResultBuilder::with_capacity(files.len());
    for src in files {
        let src = src.as_ref();
        let Some(file_name) = src.file_name() else {
            let shown = src.display().to_string();
            error!(path = %shown, "source has no file name");
            result.failure(shown, "source path has no file name".to_string());
            continue;
        };
        let name = file_name.to_string_lossy().into_owned();
        let dest = publish_dir.join(file_name);

        match move_one(src, &dest) {
            Ok(()) => {
                info!(filename = %name, from = %src.display(), to = %dest.display(), "moved file");
                result.success(name);
            }
            Err(msg) => {
                error!(filename = %name, error = %msg, "failed to move file");
                result.failure(name, msg);
            }
        }
    }

    let result = result.finish();
    info!(moved = result.success_count(), errors = result.error_count(), "relocation finished");
    Ok(result)
}

/// Create `publish_dir` (with parents) when missing; leave it alone otherwise.
fn ensure_publish_dir(publish_dir: &Path) -> Result<(), FileSystemError> {
    match fs::metadata(publish_dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(FileSystemError::PublishNotDirectory {
            path: publish_dir.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(publish_dir).map_err(|source| {
                error!(path = %publish_dir.display(), error = %source, "failed to create directory");
                FileSystemError::CreatePublishDir {
                    path: publish_dir.to_path_buf(),
                    source,
                }
            })?;
            info!(path = %publish_dir.display(), "created directory");
            Ok(())
        }
        Err(source) => Err(FileSystemError::CreatePublishDir {
            path: publish_dir.to_path_buf(),
            source,
        }),
    }
}

fn move_one(src: &Path, dest: &Path) -> Result<(), String> {
    match try_atomic_move(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => {
            warn!(src = %src.display(), "rename crosses filesystems, copying instead");
            copy_then_remove(src, dest)
        }
        Err(e) => Err(describe_io_error("move", src, &e)),
    }
}
