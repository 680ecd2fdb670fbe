//! Mapping of run failures onto HTTP responses.

use axum::Json;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::error;

use super::dto::{ExportResponse, UNKNOWN_CATEGORY};
use super::router::REQUEST_ID_HEADER;
use crate::category::Category;
use crate::errors::ExportError;

/// Error response carrying the usual export payload.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ExportResponse,
    correlation_id: Option<String>,
}

impl ApiError {
    /// Route segment did not name a category.
    pub fn unknown_category(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ExportResponse::system_failure(UNKNOWN_CATEGORY, message),
            correlation_id: None,
        }
    }

    /// 500 carrying the shared failure payload.
    pub fn from_export(category: Category, err: ExportError) -> Self {
        error!(kind = err.kind(), error = %err, "export request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ExportResponse::from_export_error(category, &err),
            correlation_id: None,
        }
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ExportResponse {
        &self.body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        if let Some(v) = self
            .correlation_id
            .as_deref()
            .and_then(|id| HeaderValue::from_str(id).ok())
        {
            headers.insert(REQUEST_ID_HEADER.clone(), v);
        }
        (self.status, headers, Json(self.body)).into_response()
    }
}
