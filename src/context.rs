//! Per-run logging context.
//!
//! A context is created by whichever trigger starts a run and handed down the
//! call chain; the span it builds tags every log line of that run.

use tracing::Span;
use uuid::Uuid;

use crate::category::Category;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationContext {
    pub correlation_id: String,
    pub operation: String,
    pub category: Option<Category>,
}

impl OperationContext {
    /// New context with a fresh random correlation id.
    pub fn new(operation: impl Into<String>) -> Self {
        Self::with_correlation_id(operation, Uuid::new_v4().hyphenated().to_string())
    }

    /// Reuse a correlation id supplied by the caller (e.g. `x-request-id`).
    pub fn with_correlation_id(operation: impl Into<String>, correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            operation: operation.into(),
            category: None,
        }
    }

    pub fn for_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn span(&self) -> Span {
        tracing::info_span!(
            "export",
            service = env!("CARGO_PKG_NAME"),
            correlation_id = %self.correlation_id,
            operation = %self.operation,
            category = self.category.map(Category::name).unwrap_or("-"),
        )
    }
}
