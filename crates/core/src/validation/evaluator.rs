//! Field evaluator. Pure logic, no DOM or network access.

use std::sync::LazyLock;

use regex::Regex;

use super::rules::{
    FieldCheck, FieldRule, FieldViolation, FormValidation, MSG_EMAIL, MSG_PHONE, MSG_REQUIRED,
    MSG_RUC,
};
use crate::config::digits_only;
use crate::lead::LeadFields;

/// `local@domain.tld` shape only, not full RFC 5322.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Maximum digits kept while the visitor types a phone number.
pub const PHONE_MAX_DIGITS: usize = 9;
/// Minimum digits accepted for a phone number on submit.
pub const PHONE_MIN_DIGITS: usize = 7;

pub const RUC_MIN_DIGITS: usize = 8;
pub const RUC_MAX_DIGITS: usize = 11;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// True iff the input, stripped of non-digits, has 7 to 9 digits.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = digits_only(phone);
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len())
}

/// True iff the input, stripped of spaces and dashes, is 8 to 11 digits.
///
/// Accepts both an 8-digit national ID and an 11-digit tax ID.
pub fn is_valid_ruc(ruc: &str) -> bool {
    let stripped: String = ruc
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    (RUC_MIN_DIGITS..=RUC_MAX_DIGITS).contains(&stripped.len())
        && stripped.chars().all(|c| c.is_ascii_digit())
}

/// Keystroke sanitiser for phone inputs: digits only, at most 9 of them.
pub fn sanitize_phone(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_MAX_DIGITS)
        .collect()
}

/// Check one field by name.
///
/// The required check runs first; field-specific rules only apply to a
/// non-empty value, so an empty optional field always passes.
pub fn validate_field(name: &str, value: &str, required: bool) -> FieldCheck {
    let value = value.trim();

    if value.is_empty() {
        return if required {
            FieldCheck::Fail {
                rule: "required",
                message: MSG_REQUIRED,
            }
        } else {
            FieldCheck::Pass
        };
    }

    let rule = FieldRule::for_field(name);
    let failure = match rule {
        FieldRule::Email if !is_valid_email(value) => Some(MSG_EMAIL),
        FieldRule::Phone if !is_valid_phone(value) => Some(MSG_PHONE),
        FieldRule::Ruc if !is_valid_ruc(value) => Some(MSG_RUC),
        FieldRule::MinLength { min, message } if value.chars().count() < min => Some(message),
        _ => None,
    };

    match failure {
        Some(message) => FieldCheck::Fail {
            rule: rule.name(),
            message,
        },
        None => FieldCheck::Pass,
    }
}

/// Validate every required field of a form.
///
/// Evaluates all of them (no short-circuit) so every error can be shown at
/// once. A required field missing from `fields` is treated as empty.
pub fn validate_form(fields: &LeadFields, required: &[&str]) -> FormValidation {
    let errors: Vec<FieldViolation> = required
        .iter()
        .filter_map(|name| {
            let value = fields.get(name).unwrap_or("");
            match validate_field(name, value, true) {
                FieldCheck::Pass => None,
                FieldCheck::Fail { rule, message } => Some(FieldViolation {
                    field: (*name).to_string(),
                    rule_type: rule.to_string(),
                    message: message.to_string(),
                }),
            }
        })
        .collect();

    FormValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}
