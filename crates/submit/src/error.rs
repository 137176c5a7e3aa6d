use std::time::Duration;

/// Failure of a single transport call.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

/// Why a lead could not be submitted.
///
/// There is no server-error variant: the request is response-opaque, so a
/// rejected lead is indistinguishable from an accepted one.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// No endpoint configured; nothing was sent.
    #[error("form endpoint is not configured")]
    Configuration,

    #[error("submission timed out after {0:?}")]
    Timeout(Duration),

    #[error("submission failed: {0}")]
    Network(String),

    #[error("could not encode lead: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl SubmitError {
    /// Short machine-readable tag used in analytics events.
    pub fn error_type(&self) -> &'static str {
        match self {
            SubmitError::Configuration => "configuration_error",
            SubmitError::Timeout(_) => "timeout",
            SubmitError::Network(_) => "network_error",
            SubmitError::Encoding(_) => "submission_error",
        }
    }

    /// Message shown to the visitor.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::Configuration => {
                "El formulario no está disponible en este momento. Por favor, contáctenos por WhatsApp."
            }
            SubmitError::Timeout(_) => {
                "La solicitud tardó demasiado. Por favor, verifique su conexión e inténtelo nuevamente."
            }
            SubmitError::Network(_) | SubmitError::Encoding(_) => {
                "Hubo un error al enviar el formulario. Por favor, inténtelo nuevamente."
            }
        }
    }
}
