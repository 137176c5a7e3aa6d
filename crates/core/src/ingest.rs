//! Ingestion-side row layout for lead submissions.
//!
//! Turns a webhook body into the 13-cell row stored in the `Leads` sheet.
//! Every field is optional and unknown fields are ignored; the only
//! presence rule is that a lead must carry a name or an email.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// Default destination sheet name.
pub const DEFAULT_SHEET_NAME: &str = "Leads";

/// Fixed header row of the destination sheet.
pub const LEAD_SHEET_HEADERS: [&str; 13] = [
    "Timestamp",
    "Nombres",
    "Email",
    "Celular",
    "Empresa",
    "RUC",
    "Cargo",
    "Mensaje",
    "Tipo Formulario",
    "URL Página",
    "Referrer",
    "User Agent",
    "IP Address",
];

pub const HEADER_BACKGROUND: &str = "#4285f4";
pub const HEADER_FONT_COLOR: &str = "white";
pub const ALTERNATE_ROW_BACKGROUND: &str = "#f8f9fa";
/// Spreadsheet number format applied to the timestamp column.
pub const TIMESTAMP_NUMBER_FORMAT: &str = "dd/mm/yyyy hh:mm:ss";

const UNKNOWN_FORM_TYPE: &str = "unknown";
const UNKNOWN_IP: &str = "Unknown";

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl CellValue {
    /// A cell counts as blank when it is text with only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Timestamp(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Timestamp(_) => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            CellValue::Timestamp(ts) => Some(*ts),
            CellValue::Text(_) => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// A lead as received by the webhook, with absent fields as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadPayload {
    pub nombres: String,
    pub email: String,
    pub celular: String,
    pub empresa: String,
    pub ruc: String,
    pub cargo: String,
    pub mensaje: String,
    pub form_type: String,
    pub page_url: String,
    pub referrer: String,
    pub user_agent: String,
    pub ip_address: String,
}

impl LeadPayload {
    /// Parse a request body. The body must be a JSON object.
    pub fn parse(body: &[u8]) -> Result<Self, CoreError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| CoreError::Malformed(e.to_string()))?;
        match value {
            Value::Object(map) => Ok(Self::from_map(&map)),
            other => Err(CoreError::Malformed(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn from_map(map: &Map<String, Value>) -> Self {
        let field = |name: &str| map.get(name).map(cell_text).unwrap_or_default();
        Self {
            nombres: field("nombres"),
            email: field("email"),
            celular: field("celular"),
            empresa: field("empresa"),
            ruc: field("ruc"),
            cargo: field("cargo"),
            mensaje: field("mensaje"),
            form_type: field("form_type"),
            page_url: field("page_url"),
            referrer: field("referrer"),
            user_agent: field("user_agent"),
            ip_address: field("ip_address"),
        }
    }

    /// Reject a lead that has neither a name nor an email.
    pub fn require_contact(&self) -> Result<(), CoreError> {
        if self.nombres.trim().is_empty() && self.email.trim().is_empty() {
            return Err(CoreError::MissingFields("nombres, email".to_string()));
        }
        Ok(())
    }

    /// Lay the lead out in header order.
    ///
    /// `fallback_ip` is used when the payload carries no `ip_address`;
    /// when both are blank the cell reads `Unknown`.
    pub fn to_row(&self, received_at: DateTime<Utc>, fallback_ip: Option<&str>) -> Vec<CellValue> {
        let form_type = non_blank(&self.form_type).unwrap_or(UNKNOWN_FORM_TYPE);
        let ip = non_blank(&self.ip_address)
            .or_else(|| fallback_ip.and_then(non_blank))
            .unwrap_or(UNKNOWN_IP);

        vec![
            CellValue::Timestamp(received_at),
            self.nombres.as_str().into(),
            self.email.as_str().into(),
            self.celular.as_str().into(),
            self.empresa.as_str().into(),
            self.ruc.as_str().into(),
            self.cargo.as_str().into(),
            self.mensaje.as_str().into(),
            form_type.into(),
            self.page_url.as_str().into(),
            self.referrer.as_str().into(),
            self.user_agent.as_str().into(),
            ip.into(),
        ]
    }
}

/// Whether the `n`th data row (1-based, header excluded) gets the
/// alternate background.
pub fn is_alternate_row(n: usize) -> bool {
    n > 0 && n % 2 == 0
}

/// Whether a first row read from the sheet holds no header at all.
pub fn is_blank_row(cells: &[CellValue]) -> bool {
    cells.iter().all(CellValue::is_blank)
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
