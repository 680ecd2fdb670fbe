//! Outcome of one relocation pass.
//!
//! `OperationResult` is assembled by the relocator through `ResultBuilder`
//! and handed out once; callers only ever see read-only slices of it.

use serde::Serialize;

/// A file that could not be moved, with the underlying error text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFailure {
    pub file_name: String,
    pub error_message: String,
}

/// Successes in input order, failures in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    successful_files: Vec<String>,
    errors: Vec<FileFailure>,
}

impl OperationResult {
    pub fn successful_files(&self) -> &[String] {
        &self.successful_files
    }

    pub fn failures(&self) -> &[FileFailure] {
        &self.errors
    }

    pub fn success_count(&self) -> usize {
        self.successful_files.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of move attempts recorded (success + error).
    pub fn attempts(&self) -> usize {
        self.success_count() + self.error_count()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_fully_successful(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the result into its two lists.
    pub fn into_parts(self) -> (Vec<String>, Vec<FileFailure>) {
        (self.successful_files, self.errors)
    }
}

/// Accumulator owned by a single relocation call.
#[derive(Debug, Default)]
pub(crate) struct ResultBuilder {
    inner: OperationResult,
}

impl ResultBuilder {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            inner: OperationResult {
                successful_files: Vec::with_capacity(n),
                errors: Vec::new(),
            },
        }
    }

    pub(crate) fn success(&mut self, file_name: String) {
        self.inner.successful_files.push(file_name);
    }

    pub(crate) fn failure(&mut self, file_name: String, error_message: String) {
        self.inner.errors.push(FileFailure {
            file_name,
            error_message,
        });
    }

    pub(crate) fn finish(self) -> OperationResult {
        self.inner
    }
}
