//! Response bodies returned by the ingestion endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const MSG_SAVED: &str = "Datos guardados exitosamente";
pub const MSG_MISSING_CONTACT: &str = "Faltan datos requeridos: nombres y email";
pub const MSG_INFO: &str = "Endpoint de leads funcionando correctamente. Usa POST para enviar datos.";
pub const MSG_PREFLIGHT: &str = "CORS preflight response";
pub const MSG_INTERNAL_PREFIX: &str = "Error interno del servidor";

/// `{ "status", "message", "timestamp" }` body shared by every ingestion
/// response. `status` mirrors the HTTP status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResponse {
    pub status: u16,
    pub message: String,
    pub timestamp: String,
}

impl IngestResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, message)
    }
}

impl IntoResponse for IngestResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Standard `{ "data": T }` envelope for the auxiliary read endpoints.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
