use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Destination sheet name.
    pub sheet: String,
    /// Whether the workbook answered a read.
    pub workbook_healthy: bool,
}

/// GET /health -- returns service and workbook health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let workbook_healthy = state.leads.stats().await.is_ok();

    let status = if workbook_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        sheet: state.leads.sheet_name().to_string(),
        workbook_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
