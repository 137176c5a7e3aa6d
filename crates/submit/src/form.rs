//! One lead form's interactive state and submit cycle.
//!
//! [`FormSession`] mirrors what the visitor sees: field values, per-field
//! error state, the submit control, and the notice raised after a submit.
//! Timers (keystroke debounce, delayed clear, confirmation window) are
//! deadlines driven by [`FormSession::tick`] or [`FormSession::settle`].

use std::collections::BTreeMap;
use std::time::Duration;

use anicama_core::config::SiteConfig;
use anicama_core::lead::{
    BrowserContext, LeadFields, FIELD_CARGO, FIELD_CELULAR, FIELD_EMAIL, FIELD_EMPRESA,
    FIELD_MENSAJE, FIELD_NOMBRES, FIELD_RUC, FIELD_TELEFONO,
};
use anicama_core::validation::{
    sanitize_phone, validate_form, Debouncer, FieldCheck, FieldRule, FieldState, FormValidation,
};
use chrono::Utc;
use tokio::time::Instant;

use crate::envelope::LeadEnvelope;
use crate::error::SubmitError;
use crate::submitter::LeadSubmitter;

pub const SENDING_LABEL: &str = "Enviando...";
pub const SENT_LABEL: &str = "✓ Enviado";
pub const MSG_FIX_ERRORS: &str = "Por favor, corrija los errores en el formulario";
pub const MSG_THANKS: &str = "¡Gracias! Hemos recibido su consulta. Nos contactaremos pronto.";

/// How long the control stays disabled showing the confirmation.
pub const CONFIRMATION_WINDOW: Duration = Duration::from_secs(3);
/// Delay before a successfully sent form is cleared.
pub const CLEAR_DELAY: Duration = Duration::from_secs(2);

/// The form's submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: String,
    pub disabled: bool,
    idle_label: String,
}

impl SubmitControl {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            disabled: false,
            idle_label: label.to_string(),
        }
    }

    fn show(&mut self, label: &str) {
        self.label = label.to_string();
        self.disabled = true;
    }

    fn restore(&mut self) {
        self.label = self.idle_label.clone();
        self.disabled = false;
    }

    pub fn idle_label(&self) -> &str {
        &self.idle_label
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Toast-style message raised by a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn success(message: &str) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.to_string(),
        }
    }

    fn error(message: &str) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// The control was disabled; nothing happened.
    Ignored,
    /// At least one required field failed; nothing was sent.
    Invalid {
        validation: FormValidation,
        notice: Notice,
    },
    /// The request did not fail.
    Sent { notice: Notice },
    /// The request failed; fields are left as they were.
    Failed { error: SubmitError, notice: Notice },
}

pub struct FormSession {
    fields: LeadFields,
    required: Vec<String>,
    states: BTreeMap<String, FieldState>,
    debouncers: BTreeMap<String, Debouncer>,
    control: SubmitControl,
    clear_at: Option<Instant>,
    restore_at: Option<Instant>,
}

impl FormSession {
    /// A form with the given inputs, all starting empty.
    pub fn new(field_names: &[&str], required: &[&str], submit_label: &str) -> Self {
        Self {
            fields: field_names.iter().map(|name| (*name, "")).collect(),
            required: required.iter().map(|name| name.to_string()).collect(),
            states: BTreeMap::new(),
            debouncers: BTreeMap::new(),
            control: SubmitControl::new(submit_label),
            clear_at: None,
            restore_at: None,
        }
    }

    /// The hero section form. It is the one that asks for a company.
    pub fn hero() -> Self {
        Self::new(
            &[
                FIELD_NOMBRES,
                FIELD_EMAIL,
                FIELD_CELULAR,
                FIELD_EMPRESA,
                FIELD_RUC,
                FIELD_CARGO,
            ],
            &[FIELD_NOMBRES, FIELD_EMAIL, FIELD_CELULAR],
            "Solicitar asesoría",
        )
    }

    /// The contact section form.
    pub fn contact() -> Self {
        Self::new(
            &[FIELD_NOMBRES, FIELD_EMAIL, FIELD_TELEFONO, FIELD_MENSAJE],
            &[FIELD_NOMBRES, FIELD_EMAIL, FIELD_TELEFONO],
            "Enviar consulta",
        )
    }

    pub fn fields(&self) -> &LeadFields {
        &self.fields
    }

    pub fn value(&self, name: &str) -> &str {
        self.fields.get(name).unwrap_or("")
    }

    pub fn field_state(&self, name: &str) -> FieldState {
        self.states.get(name).cloned().unwrap_or_default()
    }

    pub fn control(&self) -> &SubmitControl {
        &self.control
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// A keystroke. Phone inputs are sanitised on the spot; an errored field
    /// schedules a debounced revalidation.
    pub fn input(&mut self, name: &str, value: &str) {
        let value = if FieldRule::for_field(name) == FieldRule::Phone {
            sanitize_phone(value)
        } else {
            value.to_string()
        };
        self.fields.insert(name, value);

        if self.field_state(name).revalidates_on_input() {
            self.debouncers
                .entry(name.to_string())
                .or_default()
                .touch(Instant::now().into_std());
        }
    }

    /// Focus left a field; validate it now.
    pub fn blur(&mut self, name: &str) -> FieldCheck {
        if let Some(debounce) = self.debouncers.get_mut(name) {
            debounce.cancel();
        }
        self.check_field(name)
    }

    fn check_field(&mut self, name: &str) -> FieldCheck {
        let required = self.is_required(name);
        let value = self.fields.get(name).unwrap_or("");
        self.states
            .entry(name.to_string())
            .or_default()
            .on_blur(name, value, required)
    }

    /// Fire whatever timers are due. Returns the fields that were revalidated.
    pub fn tick(&mut self) -> Vec<String> {
        let now = Instant::now();

        let due: Vec<String> = self
            .debouncers
            .iter_mut()
            .filter_map(|(name, d)| d.take_due(now.into_std()).then(|| name.clone()))
            .collect();
        let mut revalidated = Vec::new();
        for name in due {
            if self.field_state(&name).revalidates_on_input() {
                self.check_field(&name);
                revalidated.push(name);
            }
        }

        if self.clear_at.is_some_and(|at| at <= now) {
            self.clear_at = None;
            self.fields.clear_values();
            self.states.clear();
            tracing::debug!("Form cleared after submission");
        }
        if self.restore_at.is_some_and(|at| at <= now) {
            self.restore_at = None;
            self.control.restore();
        }

        revalidated
    }

    /// Earliest pending timer, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncers
            .values()
            .filter_map(|d| d.deadline().map(Instant::from_std))
            .chain(self.clear_at)
            .chain(self.restore_at)
            .min()
    }

    /// Sleep through every pending timer.
    pub async fn settle(&mut self) {
        while let Some(deadline) = self.next_deadline() {
            tokio::time::sleep_until(deadline).await;
            self.tick();
        }
    }

    /// Validate everything, then send.
    ///
    /// Every required field is checked and marked before deciding, so all
    /// errors show at once. Equivalent to [`begin_submit`](Self::begin_submit),
    /// the request, then [`finish_submit`](Self::finish_submit).
    pub async fn submit(
        &mut self,
        submitter: &LeadSubmitter,
        context: &BrowserContext,
    ) -> SubmitOutcome {
        let envelope = match self.begin_submit(submitter.config(), context) {
            Ok(envelope) => envelope,
            Err(outcome) => return outcome,
        };
        let result = submitter.submit(&envelope).await;
        self.finish_submit(submitter.config(), result)
    }

    /// First half of a submit: validate and, if the form is good, disable
    /// the control with the sending label and hand back the body to post.
    ///
    /// The control stays in that state until [`finish_submit`](Self::finish_submit)
    /// is called with the request's result.
    pub fn begin_submit(
        &mut self,
        config: &SiteConfig,
        context: &BrowserContext,
    ) -> Result<LeadEnvelope, SubmitOutcome> {
        if self.control.disabled {
            return Err(SubmitOutcome::Ignored);
        }

        let required: Vec<&str> = self.required.iter().map(String::as_str).collect();
        let validation = validate_form(&self.fields, &required);
        for name in &self.required {
            let value = self.fields.get(name).unwrap_or("");
            self.states
                .entry(name.clone())
                .or_default()
                .on_blur(name, value, true);
        }

        if !validation.is_valid {
            track_form_submit(config, false, Some("validation_error"));
            return Err(SubmitOutcome::Invalid {
                validation,
                notice: Notice::error(MSG_FIX_ERRORS),
            });
        }

        self.control.show(SENDING_LABEL);
        Ok(LeadEnvelope::build(&self.fields, context, Utc::now()))
    }

    /// Second half of a submit: settle the control and timers from the
    /// request's result.
    pub fn finish_submit(
        &mut self,
        config: &SiteConfig,
        result: Result<(), SubmitError>,
    ) -> SubmitOutcome {
        match result {
            Ok(()) => {
                let now = Instant::now();
                self.control.show(SENT_LABEL);
                self.restore_at = Some(now + CONFIRMATION_WINDOW);
                self.clear_at = Some(now + CLEAR_DELAY);
                track_form_submit(config, true, None);
                SubmitOutcome::Sent {
                    notice: Notice::success(MSG_THANKS),
                }
            }
            Err(error) => {
                self.control.restore();
                track_form_submit(config, false, Some(error.error_type()));
                let notice = Notice::error(error.user_message());
                SubmitOutcome::Failed { error, notice }
            }
        }
    }
}

/// Emit the analytics event for a submit attempt when analytics is on.
fn track_form_submit(config: &SiteConfig, success: bool, error_type: Option<&str>) {
    if !config.analytics.enabled {
        return;
    }
    let event = if success {
        "form_submit_success"
    } else {
        "form_submit_error"
    };
    tracing::info!(
        target: "analytics",
        event,
        event_category = "form",
        error_type,
        measurement_id = config.analytics.measurement_id,
        "Event tracked"
    );
}
