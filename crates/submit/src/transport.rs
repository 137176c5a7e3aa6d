//! Network seam for lead submission.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;

/// Sends a JSON body to a URL without reading the reply.
///
/// Returning `Ok(())` means the request completed at the network level. It
/// says nothing about whether the receiver accepted the data.
#[async_trait]
pub trait LeadTransport: Send + Sync {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<(), TransportError>;
}

/// reqwest-backed transport; posts with `Content-Type: application/json`.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport whose client gives up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl LeadTransport for HttpTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<(), TransportError> {
        // Response-opaque: status and body are never part of the outcome.
        let _ = self.client.post(url).json(body).send().await?;
        tracing::debug!(url, "Lead request dispatched");
        Ok(())
    }
}
