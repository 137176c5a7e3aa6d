//! Site configuration for the landing page.
//!
//! Everything here is a compile-time constant: the form endpoint, the
//! client-side submission timeout, the WhatsApp contact and the analytics
//! toggle. Tests and embedders override individual values through the
//! `with_*` builders instead of mutating shared state.

use std::time::Duration;

/// WhatsApp contact used for every `wa.me` link on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppConfig {
    pub number: &'static str,
    pub message: &'static str,
}

/// Analytics toggle. The measurement ID is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsConfig {
    pub enabled: bool,
    pub measurement_id: &'static str,
}

/// Lead form submission settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Ingestion endpoint URL. Empty means "not configured".
    pub endpoint: String,
    /// Client-side timeout in milliseconds.
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub whatsapp: WhatsAppConfig,
    pub analytics: AnalyticsConfig,
    pub form: FormConfig,
}

/// Default submission timeout (10 seconds).
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

impl SiteConfig {
    /// The configuration shipped with the page.
    ///
    /// The endpoint is left blank until the spreadsheet webhook is deployed,
    /// which makes every submission fail fast with a configuration error.
    pub fn shipped() -> Self {
        Self {
            whatsapp: WhatsAppConfig {
                number: "51978150649",
                message: "Hola, me interesa conocer más sobre sus servicios de asesoría contable y tributaria.",
            },
            analytics: AnalyticsConfig {
                enabled: true,
                measurement_id: "GA_MEASUREMENT_ID",
            },
            form: FormConfig {
                endpoint: String::new(),
                timeout_ms: DEFAULT_TIMEOUT_MS,
            },
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.form.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.form.timeout_ms = timeout_ms;
        self
    }

    pub fn with_analytics(mut self, enabled: bool) -> Self {
        self.analytics.enabled = enabled;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.form.timeout_ms)
    }

    /// Whether a non-blank endpoint has been configured.
    pub fn has_endpoint(&self) -> bool {
        !self.form.endpoint.trim().is_empty()
    }

    /// Build the `wa.me` deep link with the canned message.
    ///
    /// ```
    /// use anicama_core::config::SiteConfig;
    ///
    /// let link = SiteConfig::shipped().whatsapp_link();
    /// assert!(link.starts_with("https://wa.me/51978150649?text=Hola%2C%20me"));
    /// ```
    pub fn whatsapp_link(&self) -> String {
        let number = digits_only(self.whatsapp.number);
        let message = urlencoding::encode(self.whatsapp.message);
        format!("https://wa.me/{number}?text={message}")
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::shipped()
    }
}

/// Strip everything but ASCII digits.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_endpoint_is_unconfigured() {
        let config = SiteConfig::shipped();
        assert!(!config.has_endpoint());
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn whitespace_endpoint_counts_as_unconfigured() {
        let config = SiteConfig::shipped().with_endpoint("   ");
        assert!(!config.has_endpoint());
    }

    #[test]
    fn builders_override_values() {
        let config = SiteConfig::shipped()
            .with_endpoint("https://example.com/hook")
            .with_timeout_ms(2_500)
            .with_analytics(false);
        assert!(config.has_endpoint());
        assert_eq!(config.timeout(), Duration::from_millis(2_500));
        assert!(!config.analytics.enabled);
    }

    #[test]
    fn whatsapp_link_strips_number_and_encodes_message() {
        let mut config = SiteConfig::shipped();
        config.whatsapp = WhatsAppConfig {
            number: "+51 978-150-649",
            message: "Hola, ¿qué tal?",
        };
        assert_eq!(
            config.whatsapp_link(),
            "https://wa.me/51978150649?text=Hola%2C%20%C2%BFqu%C3%A9%20tal%3F"
        );
    }

    #[test]
    fn digits_only_drops_everything_else() {
        assert_eq!(digits_only("(01) 234-5678 ext."), "012345678");
        assert_eq!(digits_only(""), "");
    }
}
