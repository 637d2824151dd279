//! Cancel action and state refresher bound to one remediation

use async_trait::async_trait;

use crate::arm::client::RemediationsClient;
use crate::arm::id::RemediationId;
use crate::arm::{ClientError, ClientResult};
use crate::types::Remediation;
use crate::waiter::{CancelAction, PollResult, StateRefresh};

pub(crate) struct SubscriptionRemediationCancellation<'a> {
    client: &'a dyn RemediationsClient,
    id: &'a RemediationId,
}

impl<'a> SubscriptionRemediationCancellation<'a> {
    pub(crate) fn new(client: &'a dyn RemediationsClient, id: &'a RemediationId) -> Self {
        Self { client, id }
    }
}

#[async_trait]
impl<'a> CancelAction for SubscriptionRemediationCancellation<'a> {
    async fn cancel(&self) -> ClientResult<()> {
        self.client.cancel_at_subscription(self.id).await.map(|_| ())
    }
}

#[async_trait]
impl<'a> StateRefresh for SubscriptionRemediationCancellation<'a> {
    type Snapshot = Remediation;

    async fn refresh(&mut self) -> ClientResult<PollResult<Remediation>> {
        let remediation = self.client.get_at_subscription(self.id).await.map_err(|e| match e {
            ClientError::Request(message) => ClientError::Request(format!(
                "issuing read request for {}: {message}",
                self.id
            )),
            other => other,
        })?;

        let state = remediation
            .properties
            .as_ref()
            .ok_or(ClientError::MissingField("properties"))?
            .provisioning_state
            .clone()
            .ok_or(ClientError::MissingField("properties.provisioningState"))?;

        Ok(PollResult {
            snapshot: remediation,
            state,
        })
    }
}
