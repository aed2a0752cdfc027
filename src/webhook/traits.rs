//! Trait abstraction for the webhook client to enable mocking in tests

use super::WebhookError;
use crate::state::RequestRecord;
use async_trait::async_trait;

/// Outbound submission of completed records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebhookSubmitter: Send + Sync {
    /// Post a record once; the response body and status are not inspected
    async fn submit(&self, record: &RequestRecord) -> Result<(), WebhookError>;

    /// Check whether the endpoint answers at all
    async fn check_liveness(&self) -> bool;
}
