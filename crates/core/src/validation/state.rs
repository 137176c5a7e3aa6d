//! Per-field error state and keystroke debounce.
//!
//! A field is revalidated on blur unconditionally. While the visitor types,
//! revalidation only happens if the field is already showing an error, and
//! then only once typing pauses for [`INPUT_DEBOUNCE`].

use std::time::{Duration, Instant};

use super::evaluator::validate_field;
use super::rules::FieldCheck;

/// Quiet period after the last keystroke before revalidating.
pub const INPUT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Visual and assistive-technology state of one form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    /// Whether the field carries the error styling.
    pub errored: bool,
    /// Text of the adjacent error-announcement region.
    pub message: String,
    /// Whether the announcement region is flagged as a polite live region.
    pub announce: bool,
}

impl FieldState {
    /// Reflect a check result: mark and announce on failure, clear on success.
    pub fn apply(&mut self, check: &FieldCheck) {
        match check.message() {
            Some(message) => {
                self.errored = true;
                self.message = message.to_string();
                self.announce = true;
            }
            None => self.clear(),
        }
    }

    pub fn clear(&mut self) {
        self.errored = false;
        self.message.clear();
        self.announce = false;
    }

    /// Validate on blur; always runs.
    pub fn on_blur(&mut self, name: &str, value: &str, required: bool) -> FieldCheck {
        let check = validate_field(name, value, required);
        self.apply(&check);
        check
    }

    /// Whether a keystroke should schedule a (debounced) revalidation.
    pub fn revalidates_on_input(&self) -> bool {
        self.errored
    }
}

/// Deadline-based trailing debounce.
///
/// Every [`touch`](Self::touch) pushes the deadline back; [`take_due`]
/// fires once when the deadline has passed and then disarms.
///
/// [`take_due`]: Self::take_due
#[derive(Debug, Clone)]
pub struct Debouncer {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(INPUT_DEBOUNCE)
    }
}
