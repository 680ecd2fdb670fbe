use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue};
use std::sync::Arc;
use tracing::info;

use super::dto::ExportResponse;
use super::errors::ApiError;
use super::router::REQUEST_ID_HEADER;
use crate::category::Category;
use crate::context::OperationContext;
use crate::service::ExportService;

const OPERATION: &str = "manual_file_export";

pub(crate) async fn health() -> &'static str {
    "ok"
}

/// `POST /v1/api/export/{category}`
pub(crate) async fn export_category(
    State(service): State<Arc<ExportService>>,
    Path(segment): Path<String>,
    headers: HeaderMap,
) -> Result<(HeaderMap, Json<ExportResponse>), ApiError> {
    let ctx = context_from(&headers);
    let category = segment
        .parse::<Category>()
        .map_err(|msg| ApiError::unknown_category(msg).with_correlation_id(&ctx.correlation_id))?;
    let ctx = ctx.for_category(category);
    info!(category = %category, correlation_id = %ctx.correlation_id, "manual export triggered");

    match service.export(category, &ctx).await {
        Ok(result) => Ok((
            echo_header(&ctx.correlation_id),
            Json(ExportResponse::from_result(category, result)),
        )),
        Err(e) => Err(ApiError::from_export(category, e).with_correlation_id(&ctx.correlation_id)),
    }
}

fn context_from(headers: &HeaderMap) -> OperationContext {
    match headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        Some(id) => OperationContext::with_correlation_id(OPERATION, id),
        None => OperationContext::new(OPERATION),
    }
}

fn echo_header(correlation_id: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(v) = HeaderValue::from_str(correlation_id) {
        headers.insert(REQUEST_ID_HEADER.clone(), v);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use axum::response::IntoResponse;
    use axum::http::StatusCode;

    fn service(td: &assert_fs::TempDir) -> Arc<ExportService> {
        Arc::new(ExportService::new(td.path().join("tmp"), td.path().join("export")))
    }

    #[tokio::test]
    async fn handler_relocates_and_echoes_request_id() {
        let td = assert_fs::TempDir::new().unwrap();
        td.child("tmp/redemption_a.txt").write_str("a").unwrap();
        td.child("tmp/outpay_a.txt").write_str("b").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER.clone(), HeaderValue::from_static("req-42"));

        let (out_headers, Json(body)) =
            export_category(State(service(&td)), Path("redemption".into()), headers)
                .await
                .unwrap();

        assert_eq!(out_headers.get(&REQUEST_ID_HEADER).unwrap(), "req-42");
        assert_eq!(body.category, "REDEMPTION");
        assert_eq!(body.files_processed, 1);
        assert_eq!(body.successful_files, ["redemption_a.txt"]);
        assert!(body.errors.is_empty());
        td.child("export/redemption_a.txt").assert("a");
        td.child("tmp/outpay_a.txt").assert("b");
    }

    #[tokio::test]
    async fn unknown_segment_is_404() {
        let td = assert_fs::TempDir::new().unwrap();
        let err = export_category(State(service(&td)), Path("refunds".into()), HeaderMap::new())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn staging_file_is_500_with_system_error() {
        let td = assert_fs::TempDir::new().unwrap();
        td.child("tmp").write_str("oops").unwrap();
        let err = export_category(State(service(&td)), Path("own-and-ben".into()), HeaderMap::new())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body().category, "OWN_AND_BEN");
        assert_eq!(err.body().errors[0].file_name, "system");
    }

    #[test]
    fn blank_request_id_gets_a_fresh_one() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER.clone(), HeaderValue::from_static("  "));
        let ctx = context_from(&headers);
        assert_eq!(ctx.correlation_id.len(), 36);
        assert_eq!(ctx.operation, OPERATION);
    }
}
