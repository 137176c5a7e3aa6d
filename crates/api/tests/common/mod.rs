#![allow(dead_code)]

use std::sync::Arc;

use anicama_api::config::ServerConfig;
use anicama_api::router::build_app_router;
use anicama_api::state::AppState;
use anicama_sheets::{LeadSheetRepo, MemoryWorkbook, Workbook};
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        sheet_name: "Leads".to_string(),
        workbook_path: None,
    }
}

/// Build the full application router over the given workbook.
pub fn build_test_app_with(workbook: Arc<dyn Workbook>) -> Router {
    let config = test_config();
    let state = AppState {
        leads: Arc::new(LeadSheetRepo::new(workbook, config.sheet_name.clone())),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Build the app over a fresh in-memory workbook, returning both so tests can
/// inspect what was stored.
pub fn build_test_app() -> (Router, Arc<MemoryWorkbook>) {
    let workbook = Arc::new(MemoryWorkbook::new());
    (build_test_app_with(workbook.clone()), workbook)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST a raw body with the given content type.
pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, "application/json", &body.to_string()).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
