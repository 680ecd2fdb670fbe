//! Response payloads.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::errors::ExportError;
use crate::model::OperationResult;

/// Category tag used when the request named no known category.
pub const UNKNOWN_CATEGORY: &str = "UNKNOWN";
/// `fileName` used for faults that are not tied to one file.
pub const SYSTEM_FILE_NAME: &str = "system";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub file_name: String,
    pub error_message: String,
}

/// Body returned by every export request, success or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub category: String,
    pub files_processed: usize,
    pub successful_files: Vec<String>,
    pub errors: Vec<ErrorDetail>,
}

impl ExportResponse {
    /// `filesProcessed` counts moved files only; failures are listed in `errors`.
    pub fn from_result(category: Category, result: OperationResult) -> Self {
        let files_processed = result.success_count();
        let (successful_files, failures) = result.into_parts();
        Self {
            category: category.name().to_string(),
            files_processed,
            successful_files,
            errors: failures
                .into_iter()
                .map(|f| ErrorDetail {
                    file_name: f.file_name,
                    error_message: f.error_message,
                })
                .collect(),
        }
    }

    /// Failure payload for an aborted run. Filesystem faults keep their own
    /// message; anything else is reported as unexpected.
    pub fn from_export_error(category: Category, err: &ExportError) -> Self {
        let message = match err {
            ExportError::FileSystem(e) => e.to_string(),
            ExportError::Task(e) => format!("An unexpected error occurred: {e}"),
        };
        Self::system_failure(category.name(), message)
    }

    /// Payload for a run that aborted before any per-file work was reported.
    pub fn system_failure(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            files_processed: 0,
            successful_files: Vec::new(),
            errors: vec![ErrorDetail {
                file_name: SYSTEM_FILE_NAME.to_string(),
                error_message: message.into(),
            }],
        }
    }
}
