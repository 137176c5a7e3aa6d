//! Handlers for the lead ingestion webhook.
//!
//! The browser posts leads response-opaque, so the body usually arrives as
//! `text/plain`. It is read as raw bytes and parsed as JSON whatever the
//! declared content type.

use anicama_core::ingest::LeadPayload;
use anicama_sheets::LeadStats;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use crate::cors::preflight_headers;
use crate::error::AppResult;
use crate::response::{DataResponse, IngestResponse, MSG_INFO, MSG_PREFLIGHT, MSG_SAVED};
use crate::state::AppState;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// POST / (also POST /leads)
///
/// Validate the lead and append it to the lead sheet.
pub async fn ingest(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<IngestResponse> {
    let payload = LeadPayload::parse(&body)?;
    payload.require_contact()?;

    let forwarded = client_ip(&headers);
    let row = payload.to_row(Utc::now(), forwarded.as_deref());
    let outcome = state.leads.append(row).await?;

    tracing::info!(
        row = outcome.row,
        form_type = %payload.form_type,
        header_written = outcome.header_written,
        "Lead stored"
    );
    Ok(IngestResponse::ok(MSG_SAVED))
}

/// GET /
pub async fn info() -> IngestResponse {
    IngestResponse::ok(MSG_INFO)
}

/// OPTIONS /
///
/// Answers preflights for the ingest route with a readable body.
pub async fn preflight() -> impl IntoResponse {
    (preflight_headers(), IngestResponse::ok(MSG_PREFLIGHT))
}

/// GET /stats
///
/// Number of stored leads and the timestamp of the newest one.
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<DataResponse<LeadStats>>> {
    let stats = state.leads.stats().await?;
    Ok(Json(DataResponse { data: stats }))
}

/// Client address from proxy headers: first `X-Forwarded-For` hop, else
/// `X-Real-IP`.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header(X_FORWARDED_FOR)
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| header(X_REAL_IP))
        .map(str::to_string)
}
