use anicama_core::error::CoreError;
use anicama_sheets::SheetError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::response::{IngestResponse, MSG_INTERNAL_PREFIX, MSG_MISSING_CONTACT};

/// Application-level error type for HTTP handlers.
///
/// Every variant renders as an [`IngestResponse`] so clients always see the
/// same `{status, message, timestamp}` shape.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `anicama_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The workbook could not be read or written.
    #[error(transparent)]
    Sheet(#[from] SheetError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(CoreError::MissingFields(fields)) => {
                tracing::warn!(%fields, "Lead rejected: missing contact data");
                (StatusCode::BAD_REQUEST, MSG_MISSING_CONTACT.to_string())
            }
            AppError::Core(CoreError::Malformed(msg)) => {
                tracing::error!(error = %msg, "Unreadable lead payload");
                internal(msg)
            }
            AppError::Sheet(err) => {
                tracing::error!(error = %err, "Workbook error");
                internal(err)
            }
        };

        IngestResponse::new(status, message).into_response()
    }
}

fn internal(detail: impl std::fmt::Display) -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("{MSG_INTERNAL_PREFIX}: {detail}"),
    )
}
