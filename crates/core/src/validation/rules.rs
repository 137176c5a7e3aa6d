//! Validation rule and result types.

use serde::{Deserialize, Serialize};

use crate::lead::{
    FIELD_CARGO, FIELD_CELULAR, FIELD_EMAIL, FIELD_EMPRESA, FIELD_NOMBRES, FIELD_RUC,
    FIELD_TELEFONO,
};

pub const MSG_REQUIRED: &str = "Este campo es obligatorio";
pub const MSG_EMAIL: &str = "Ingrese un email válido";
pub const MSG_PHONE: &str = "Ingrese un celular válido (debe tener entre 7 y 9 dígitos)";
pub const MSG_RUC: &str = "El RUC debe tener entre 8 y 11 dígitos";
pub const MSG_NOMBRES: &str = "El nombre debe tener al menos 2 caracteres";
pub const MSG_EMPRESA: &str = "El nombre de la empresa debe tener al menos 2 caracteres";
pub const MSG_CARGO: &str = "El cargo debe tener al menos 2 caracteres";

/// Minimum trimmed length for free-text name-like fields.
pub const MIN_TEXT_LEN: usize = 2;

/// The field-specific rule applied once a value is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Email,
    Phone,
    Ruc,
    MinLength {
        min: usize,
        message: &'static str,
    },
    /// No rule beyond the required check.
    Free,
}

impl FieldRule {
    /// Look up the rule for an input name.
    pub fn for_field(name: &str) -> Self {
        match name {
            FIELD_EMAIL => FieldRule::Email,
            FIELD_CELULAR | FIELD_TELEFONO => FieldRule::Phone,
            FIELD_RUC => FieldRule::Ruc,
            FIELD_NOMBRES => FieldRule::MinLength {
                min: MIN_TEXT_LEN,
                message: MSG_NOMBRES,
            },
            FIELD_EMPRESA => FieldRule::MinLength {
                min: MIN_TEXT_LEN,
                message: MSG_EMPRESA,
            },
            FIELD_CARGO => FieldRule::MinLength {
                min: MIN_TEXT_LEN,
                message: MSG_CARGO,
            },
            _ => FieldRule::Free,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldRule::Email => "email",
            FieldRule::Phone => "phone",
            FieldRule::Ruc => "ruc",
            FieldRule::MinLength { .. } => "min_length",
            FieldRule::Free => "free",
        }
    }
}

/// Outcome of checking one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldCheck {
    Pass,
    Fail { rule: &'static str, message: &'static str },
}

impl FieldCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, FieldCheck::Pass)
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            FieldCheck::Pass => None,
            FieldCheck::Fail { message, .. } => Some(*message),
        }
    }
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule_type: String,
    pub message: String,
}

/// Aggregated result of validating every required field of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValidation {
    pub is_valid: bool,
    pub errors: Vec<FieldViolation>,
}

impl FormValidation {
    pub fn is_flagged(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}
