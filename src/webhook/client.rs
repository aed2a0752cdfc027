//! HTTP client for the spreadsheet webhook
//!
//! Submissions are a single JSON POST. The receiving script appends one row
//! per request and answers GET with a liveness string.

use super::traits::WebhookSubmitter;
use super::WebhookError;
use crate::state::RequestRecord;
use async_trait::async_trait;
use std::time::Duration;

/// Timeout for the startup liveness probe
const LIVENESS_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for posting records to the webhook
#[derive(Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    url: String,
}

impl WebhookClient {
    /// Create a new webhook client
    pub fn new(url: impl Into<String>) -> Result<Self, WebhookError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl WebhookSubmitter for WebhookClient {
    async fn submit(&self, record: &RequestRecord) -> Result<(), WebhookError> {
        // `json` sets Content-Type: application/json
        self.client.post(&self.url).json(record).send().await?;
        Ok(())
    }

    async fn check_liveness(&self) -> bool {
        let response = self
            .client
            .get(&self.url)
            .timeout(LIVENESS_TIMEOUT)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                let body = resp.text().await.unwrap_or_default();
                tracing::info!("Webhook reachable: {}", body.trim());
                true
            }
            Ok(resp) => {
                tracing::warn!("Webhook liveness check returned {}", resp.status());
                false
            }
            Err(e) => {
                tracing::warn!("Webhook liveness check failed: {e}");
                false
            }
        }
    }
}
