//! Fire-and-forget lead submission.
//!
//! [`LeadSubmitter`] posts a [`LeadEnvelope`] to the configured endpoint and
//! reports success when the transport call completes. The call is bounded by
//! the configured timeout; there is no retry.

use std::sync::Arc;

use anicama_core::config::SiteConfig;

use crate::envelope::LeadEnvelope;
use crate::error::{SubmitError, TransportError};
use crate::transport::{HttpTransport, LeadTransport};

pub struct LeadSubmitter {
    config: SiteConfig,
    transport: Arc<dyn LeadTransport>,
}

impl LeadSubmitter {
    pub fn new(config: SiteConfig, transport: Arc<dyn LeadTransport>) -> Self {
        Self { config, transport }
    }

    /// Submitter backed by reqwest, using the configured timeout.
    pub fn http(config: SiteConfig) -> Result<Self, SubmitError> {
        let transport =
            HttpTransport::new(config.timeout()).map_err(|e| SubmitError::Network(e.to_string()))?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Post one lead.
    ///
    /// An unconfigured endpoint fails immediately without touching the
    /// network. Otherwise `Ok(())` means "the request did not fail", which
    /// is the strongest statement a response-opaque request allows.
    pub async fn submit(&self, envelope: &LeadEnvelope) -> Result<(), SubmitError> {
        if !self.config.has_endpoint() {
            tracing::warn!("Lead submission skipped: form endpoint is not configured");
            return Err(SubmitError::Configuration);
        }

        let endpoint = self.config.form.endpoint.trim();
        let timeout = self.config.timeout();
        let body = serde_json::to_value(envelope)?;

        let call = self.transport.post_json(endpoint, &body);
        let result = match tokio::time::timeout(timeout, call).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(TransportError::Timeout)) | Err(_) => Err(SubmitError::Timeout(timeout)),
            Ok(Err(TransportError::Network(msg))) => Err(SubmitError::Network(msg)),
        };

        match &result {
            Ok(()) => tracing::info!(form_type = envelope.form_type.as_str(), "Lead submitted"),
            Err(e) => tracing::warn!(
                error = %e,
                error_type = e.error_type(),
                form_type = envelope.form_type.as_str(),
                "Lead submission failed"
            ),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use anicama_core::lead::{BrowserContext, LeadFields};
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;

    /// Transport that waits, then answers with a canned result.
    struct FakeTransport {
        delay: Duration,
        fail: Option<fn() -> TransportError>,
        calls: AtomicUsize,
        last_url: Mutex<Option<String>>,
    }

    impl FakeTransport {
        fn ok(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                delay,
                fail: None,
                calls: AtomicUsize::new(0),
                last_url: Mutex::new(None),
            })
        }

        fn failing(fail: fn() -> TransportError) -> Arc<Self> {
            Arc::new(Self {
                delay: Duration::ZERO,
                fail: Some(fail),
                calls: AtomicUsize::new(0),
                last_url: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl LeadTransport for FakeTransport {
        async fn post_json(
            &self,
            url: &str,
            _body: &serde_json::Value,
        ) -> Result<(), TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_url.lock().unwrap() = Some(url.to_string());
            tokio::time::sleep(self.delay).await;
            match self.fail {
                Some(make) => Err(make()),
                None => Ok(()),
            }
        }
    }

    fn envelope() -> LeadEnvelope {
        let fields = LeadFields::new()
            .with("nombres", "Ana")
            .with("email", "ana@mail.com");
        LeadEnvelope::build(&fields, &BrowserContext::default(), Utc::now())
    }

    fn configured() -> SiteConfig {
        SiteConfig::shipped().with_endpoint("https://hooks.example.com/leads")
    }

    #[tokio::test]
    async fn unconfigured_endpoint_fails_without_network_call() {
        let transport = FakeTransport::ok(Duration::ZERO);
        let submitter = LeadSubmitter::new(SiteConfig::shipped(), transport.clone());

        assert_matches!(
            submitter.submit(&envelope()).await,
            Err(SubmitError::Configuration)
        );
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn completed_request_counts_as_success() {
        let transport = FakeTransport::ok(Duration::ZERO);
        let submitter = LeadSubmitter::new(configured(), transport.clone());

        assert!(submitter.submit(&envelope()).await.is_ok());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            transport.last_url.lock().unwrap().as_deref(),
            Some("https://hooks.example.com/leads")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn slow_transport_reports_timeout() {
        let transport = FakeTransport::ok(Duration::from_secs(15));
        let submitter =
            LeadSubmitter::new(configured().with_timeout_ms(10_000), transport.clone());

        let err = submitter.submit(&envelope()).await.unwrap_err();
        assert_matches!(err, SubmitError::Timeout(d) if d == Duration::from_secs(10));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn request_within_timeout_succeeds() {
        let transport = FakeTransport::ok(Duration::from_secs(9));
        let submitter = LeadSubmitter::new(configured(), transport);
        assert!(submitter.submit(&envelope()).await.is_ok());
    }

    #[tokio::test]
    async fn transport_timeout_is_not_a_network_error() {
        let submitter = LeadSubmitter::new(
            configured(),
            FakeTransport::failing(|| TransportError::Timeout),
        );
        assert_matches!(
            submitter.submit(&envelope()).await,
            Err(SubmitError::Timeout(_))
        );
    }

    #[tokio::test]
    async fn network_failure_is_reported_and_not_retried() {
        let transport = FakeTransport::failing(|| TransportError::Network("refused".into()));
        let submitter = LeadSubmitter::new(configured(), transport.clone());

        assert_matches!(
            submitter.submit(&envelope()).await,
            Err(SubmitError::Network(msg)) if msg == "refused"
        );
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }
}
