//! Typed error definitions for export_mover.
//! Only faults that abort a whole discovery or relocation call live here;
//! per-file move failures are captured into `OperationResult` instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileSystemError {
    #[error("Refusing to list files with an empty prefix")]
    EmptyPrefix,

    #[error("Failed to list files with prefix: {prefix} - path is not a directory: {}", path.display())]
    StagingNotDirectory { path: PathBuf, prefix: String },

    #[error("Failed to list files with prefix: {prefix} in {}: {source}", path.display())]
    ListStaging {
        path: PathBuf,
        prefix: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to create export directory: {}: {source}", path.display())]
    CreatePublishDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Export path exists but is not a directory: {}", path.display())]
    PublishNotDirectory { path: PathBuf },
}

impl FileSystemError {
    /// Stable short code for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FileSystemError::EmptyPrefix => "empty_prefix",
            FileSystemError::StagingNotDirectory { .. } => "staging_not_directory",
            FileSystemError::ListStaging { .. } => "list_staging",
            FileSystemError::CreatePublishDir { .. } => "create_publish_dir",
            FileSystemError::PublishNotDirectory { .. } => "publish_not_directory",
        }
    }
}

/// Failures surfaced by the trigger layer around a discovery/relocation run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    FileSystem(#[from] FileSystemError),

    #[error("export task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ExportError {
    pub fn kind(&self) -> &'static str {
        match self {
            ExportError::FileSystem(e) => e.kind(),
            ExportError::Task(_) => "task_failed",
        }
    }
}
