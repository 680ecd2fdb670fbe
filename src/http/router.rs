use anyhow::{Context, Result};
use axum::Router;
use axum::http::HeaderName;
use axum::routing::{get, post};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers::{export_category, health};
use crate::service::ExportService;

/// Request header carrying the caller's correlation id; echoed on responses.
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

pub fn router(service: Arc<ExportService>) -> Router {
    Router::new()
        .route("/v1/api/export/{category}", post(export_category))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve `app` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("read listener address")?;
    info!(%addr, "http trigger listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("http server error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ExportResponse;
    use assert_fs::prelude::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app(td: &assert_fs::TempDir) -> Router {
        router(Arc::new(ExportService::new(td.path().join("tmp"), td.path().join("export"))))
    }

    fn post_to(uri: &str) -> Request<Body> {
        Request::builder().method("POST").uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn export_route_returns_payload() {
        let td = assert_fs::TempDir::new().unwrap();
        td.child("tmp/outpay_x.csv").write_str("x").unwrap();

        let resp = app(&td).oneshot(post_to("/v1/api/export/outpay")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(&REQUEST_ID_HEADER));
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: ExportResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.category, "OUTPAY");
        assert_eq!(body.successful_files, ["outpay_x.csv"]);
    }

    #[tokio::test]
    async fn empty_staging_is_still_ok() {
        let td = assert_fs::TempDir::new().unwrap();
        let resp = app(&td).oneshot(post_to("/v1/api/export/redemption")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: ExportResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.files_processed, 0);
        assert!(td.path().join("export").is_dir());
    }

    #[tokio::test]
    async fn partial_failure_reports_moved_count_and_failed_file() {
        let td = assert_fs::TempDir::new().unwrap();
        td.child("tmp/outpay_a.csv").write_str("a").unwrap();
        td.child("tmp/outpay_b.csv").write_str("b").unwrap();
        // A directory already sitting at the destination name makes that move fail.
        td.child("export/outpay_b.csv/keep").write_str("k").unwrap();

        let resp = app(&td).oneshot(post_to("/v1/api/export/outpay")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: ExportResponse = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body.files_processed, 1);
        assert_eq!(body.successful_files, ["outpay_a.csv"]);
        assert_eq!(body.errors.len(), 1);
        assert_eq!(body.errors[0].file_name, "outpay_b.csv");
        assert!(!body.errors[0].error_message.is_empty());
        td.child("export/outpay_a.csv").assert("a");
        td.child("tmp/outpay_b.csv").assert("b");
    }

    #[tokio::test]
    async fn get_on_export_route_is_rejected() {
        let td = assert_fs::TempDir::new().unwrap();
        let req = Request::builder().uri("/v1/api/export/outpay").body(Body::empty()).unwrap();
        let resp = app(&td).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn health_answers() {
        let td = assert_fs::TempDir::new().unwrap();
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let resp = app(&td).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
