//! Webhook module for forwarding completed records

mod client;
mod traits;

pub use client::WebhookClient;
pub use traits::WebhookSubmitter;

#[cfg(test)]
pub use traits::MockWebhookSubmitter;

use crate::state::RequestRecord;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;

/// Errors that can occur when talking to the webhook
#[derive(Debug, Error)]
pub enum WebhookError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Send a record without waiting for the outcome.
///
/// Delivery is best-effort and at-most-once: failures are logged and never
/// retried. The handle resolves to whether the request went out.
pub fn dispatch(submitter: Arc<dyn WebhookSubmitter>, record: RequestRecord) -> JoinHandle<bool> {
    tokio::spawn(async move {
        match submitter.submit(&record).await {
            Ok(()) => {
                tracing::info!("Record {} sent to webhook", record.id);
                true
            }
            Err(e) => {
                tracing::error!("Failed to send record {} to webhook: {e}", record.id);
                false
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RequestKind;
    use chrono::Utc;

    fn record() -> RequestRecord {
        RequestRecord {
            kind: RequestKind::ProductOrder,
            id: "ORD-1".to_string(),
            product: "BPC-157".to_string(),
            customer_name: "Jane".to_string(),
            contact_info: "jane@x.com".to_string(),
            quantity: Some("5".to_string()),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_dispatch_submits_once() {
        let mut mock = MockWebhookSubmitter::new();
        mock.expect_submit()
            .withf(|r| r.id == "ORD-1")
            .times(1)
            .returning(|_| Ok(()));

        let sent = dispatch(Arc::new(mock), record()).await.unwrap();
        assert!(sent);
    }

    #[tokio::test]
    async fn test_dispatch_swallows_failures() {
        let mut mock = MockWebhookSubmitter::new();
        mock.expect_submit().times(1).returning(|_| {
            Err(WebhookError::Http(
                reqwest::Client::new()
                    .get("not a url")
                    .build()
                    .unwrap_err(),
            ))
        });

        let sent = dispatch(Arc::new(mock), record()).await.unwrap();
        assert!(!sent);
    }
}
