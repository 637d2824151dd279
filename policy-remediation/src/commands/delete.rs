//! Delete logic for the remediation service

use log::{debug, info};

use crate::arm::client::find_remediation;
use crate::arm::id::RemediationId;
use crate::arm::ClientError;
use crate::commands::cancellation::SubscriptionRemediationCancellation;
use crate::error::{RemediationError, RemediationResult};
use crate::waiter::wait_for_delete;

impl super::service::RemediationService {
    /// Delete a remediation, cancelling it first when it is still re-evaluating compliance.
    ///
    /// Deleting a remediation that no longer exists succeeds.
    pub async fn delete(&self, id: &RemediationId) -> RemediationResult<()> {
        let id_str = id.to_string();
        let deadline = self.deadline(self.settings.timeouts.delete);
        let client = self.client.as_ref();

        // `ReEvaluateCompliance` remediations must be cancelled before deletion, so
        // the current discovery mode is looked up first
        let Some(existing) = deadline
            .run("retrieving", &id_str, async {
                find_remediation(client, id)
                    .await
                    .map_err(|e| RemediationError::client("retrieving", id, e))
            })
            .await?
        else {
            info!("{} does not exist - nothing to delete", id);
            return Ok(());
        };

        let canceller = SubscriptionRemediationCancellation::new(client, id);
        let mut refresher = SubscriptionRemediationCancellation::new(client, id);
        wait_for_delete(
            existing.properties.as_ref(),
            &id_str,
            &deadline,
            &self.settings.waiter,
            &canceller,
            &mut refresher,
        )
        .await?;

        debug!("deleting {}", id);
        deadline
            .run("deleting", &id_str, async {
                match client.delete_at_subscription(id).await {
                    Ok(()) | Err(ClientError::NotFound) => Ok(()),
                    Err(e) => Err(RemediationError::client("deleting", id, e)),
                }
            })
            .await
    }
}
