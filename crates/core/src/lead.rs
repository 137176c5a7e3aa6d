//! Lead submission data model shared by the submitter and the ingestion
//! endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field names recognised by the lead forms.
pub const FIELD_NOMBRES: &str = "nombres";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_CELULAR: &str = "celular";
pub const FIELD_TELEFONO: &str = "telefono";
pub const FIELD_EMPRESA: &str = "empresa";
pub const FIELD_RUC: &str = "ruc";
pub const FIELD_CARGO: &str = "cargo";
pub const FIELD_MENSAJE: &str = "mensaje";

/// Which of the two landing page forms produced a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormType {
    HeroForm,
    ContactForm,
}

impl FormType {
    /// The hero form is the only one with an `empresa` input.
    pub fn detect(fields: &LeadFields) -> Self {
        if fields.contains(FIELD_EMPRESA) {
            FormType::HeroForm
        } else {
            FormType::ContactForm
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormType::HeroForm => "hero_form",
            FormType::ContactForm => "contact_form",
        }
    }
}

/// Raw form values keyed by input name, in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFields {
    values: BTreeMap<String, String>,
}

impl LeadFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Trimmed value of a field, or `""` when the field is absent.
    pub fn trimmed(&self, name: &str) -> &str {
        self.get(name).map(str::trim).unwrap_or("")
    }

    /// The phone number under whichever name the form used.
    ///
    /// The hero form calls it `celular`, the contact form `telefono`.
    pub fn phone(&self) -> &str {
        match self.get(FIELD_CELULAR) {
            Some(v) if !v.trim().is_empty() => v.trim(),
            _ => self.trimmed(FIELD_TELEFONO),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Blank every value while keeping the field set.
    pub fn clear_values(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LeadFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Browser context captured at submission time; never typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserContext {
    pub page_url: String,
    pub user_agent: String,
    /// `None` or empty when the visitor arrived directly.
    pub referrer: Option<String>,
}

impl BrowserContext {
    /// Referrer as reported in the envelope; `"Direct"` when there is none.
    pub fn referrer_or_direct(&self) -> &str {
        match self.referrer.as_deref() {
            Some(r) if !r.trim().is_empty() => r,
            _ => "Direct",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empresa_selects_hero_form() {
        let hero = LeadFields::new().with("nombres", "Ana").with("empresa", "");
        let contact = LeadFields::new().with("nombres", "Ana");
        assert_eq!(FormType::detect(&hero), FormType::HeroForm);
        assert_eq!(FormType::detect(&contact), FormType::ContactForm);
    }

    #[test]
    fn form_type_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(FormType::HeroForm).unwrap(),
            serde_json::json!("hero_form")
        );
        assert_eq!(FormType::ContactForm.as_str(), "contact_form");
    }

    #[test]
    fn phone_prefers_celular_then_telefono() {
        let both = LeadFields::new()
            .with("celular", " 987654321 ")
            .with("telefono", "912345678");
        assert_eq!(both.phone(), "987654321");

        let only_telefono = LeadFields::new()
            .with("celular", "")
            .with("telefono", "912345678");
        assert_eq!(only_telefono.phone(), "912345678");

        assert_eq!(LeadFields::new().phone(), "");
    }

    #[test]
    fn clear_values_keeps_field_names() {
        let mut fields = LeadFields::new().with("nombres", "Ana").with("empresa", "ACME");
        fields.clear_values();
        assert_eq!(fields.get("nombres"), Some(""));
        assert!(fields.contains("empresa"));
        assert_eq!(FormType::detect(&fields), FormType::HeroForm);
    }

    #[test]
    fn referrer_defaults_to_direct() {
        let mut ctx = BrowserContext::default();
        assert_eq!(ctx.referrer_or_direct(), "Direct");
        ctx.referrer = Some("  ".into());
        assert_eq!(ctx.referrer_or_direct(), "Direct");
        ctx.referrer = Some("https://google.com".into());
        assert_eq!(ctx.referrer_or_direct(), "https://google.com");
    }
}
