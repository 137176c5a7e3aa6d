//! The JSON body posted for every lead.

use anicama_core::lead::{
    BrowserContext, FormType, LeadFields, FIELD_CARGO, FIELD_EMAIL, FIELD_EMPRESA, FIELD_MENSAJE,
    FIELD_NOMBRES, FIELD_RUC,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Source tag identifying the landing page as the lead's origin.
pub const SOURCE_TAG: &str = "landing_page";

/// Fixed-shape lead envelope. Every field is always present; fields the
/// form does not have are sent as `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadEnvelope {
    pub timestamp: String,
    pub source: String,
    pub form_type: FormType,
    pub nombres: String,
    pub email: String,
    /// Normalised from either `celular` or `telefono`.
    pub celular: String,
    pub empresa: String,
    pub ruc: String,
    pub cargo: String,
    pub mensaje: String,
    pub page_url: String,
    pub user_agent: String,
    pub referrer: String,
}

impl LeadEnvelope {
    pub fn build(fields: &LeadFields, context: &BrowserContext, now: DateTime<Utc>) -> Self {
        Self {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            source: SOURCE_TAG.to_string(),
            form_type: FormType::detect(fields),
            nombres: fields.trimmed(FIELD_NOMBRES).to_string(),
            email: fields.trimmed(FIELD_EMAIL).to_string(),
            celular: fields.phone().to_string(),
            empresa: fields.trimmed(FIELD_EMPRESA).to_string(),
            ruc: fields.trimmed(FIELD_RUC).to_string(),
            cargo: fields.trimmed(FIELD_CARGO).to_string(),
            mensaje: fields.trimmed(FIELD_MENSAJE).to_string(),
            page_url: context.page_url.clone(),
            user_agent: context.user_agent.clone(),
            referrer: context.referrer_or_direct().to_string(),
        }
    }
}
