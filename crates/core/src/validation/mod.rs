//! Lead form validation.
//!
//! Field rules and messages, a pure evaluator, and the per-field error state
//! that drives blur/keystroke revalidation. No I/O happens here.

pub mod evaluator;
pub mod rules;
pub mod state;

pub use evaluator::{
    is_valid_email, is_valid_phone, is_valid_ruc, sanitize_phone, validate_field, validate_form,
};
pub use rules::{FieldCheck, FieldRule, FieldViolation, FormValidation};
pub use state::{Debouncer, FieldState};
