//! Remediations client seam for subscription-scoped operations
//!
//! Transport, authentication and retry of transient HTTP failures belong to the
//! implementor. A missing entity must be reported as [`ClientError::NotFound`].

use async_trait::async_trait;

use crate::arm::id::RemediationId;
use crate::arm::{ClientError, ClientResult};
use crate::types::Remediation;

#[async_trait]
pub trait RemediationsClient: Send + Sync {
    async fn get_at_subscription(&self, id: &RemediationId) -> ClientResult<Remediation>;

    async fn create_or_update_at_subscription(
        &self,
        id: &RemediationId,
        parameters: &Remediation,
    ) -> ClientResult<Remediation>;

    /// Requests cancellation of a running remediation. Idempotent on the remote side.
    async fn cancel_at_subscription(&self, id: &RemediationId) -> ClientResult<Remediation>;

    async fn delete_at_subscription(&self, id: &RemediationId) -> ClientResult<()>;
}

/// Fetch a remediation, mapping NotFound to `None`
pub(crate) async fn find_remediation(
    client: &dyn RemediationsClient,
    id: &RemediationId,
) -> ClientResult<Option<Remediation>> {
    match client.get_at_subscription(id).await {
        Ok(remediation) => Ok(Some(remediation)),
        Err(ClientError::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}
