//! Create/update logic for the remediation service

use log::debug;

use crate::arm::client::find_remediation;
use crate::error::{RemediationError, RemediationResult};
use crate::types::{Remediation, RemediationState, SubscriptionPolicyRemediation};

impl super::service::RemediationService {
    /// Create or update a remediation from its configuration, then read it back.
    ///
    /// A new remediation must not exist yet: an existing one has to be imported
    /// rather than silently taken over.
    pub async fn create_or_update(
        &self,
        config: &SubscriptionPolicyRemediation,
        is_new: bool,
    ) -> RemediationResult<RemediationState> {
        let id = config.id();
        let id_str = id.to_string();
        let (operation, timeout) = if is_new {
            ("creating", self.settings.timeouts.create)
        } else {
            ("updating", self.settings.timeouts.update)
        };
        let deadline = self.deadline(timeout);

        deadline
            .run(operation, &id_str, async {
                if is_new {
                    let existing = find_remediation(self.client.as_ref(), &id)
                        .await
                        .map_err(|e| {
                            RemediationError::client("checking for presence of existing", &id, e)
                        })?;
                    if existing.is_some() {
                        return Err(RemediationError::AlreadyExists { id: id_str.clone() });
                    }
                }

                let parameters = Remediation {
                    properties: Some(config.to_properties()),
                    ..Default::default()
                };
                debug!("{} {}", operation, id);
                self.client
                    .create_or_update_at_subscription(&id, &parameters)
                    .await
                    .map_err(|e| RemediationError::client(operation, &id, e))?;
                Ok::<(), RemediationError>(())
            })
            .await?;

        self.read(&id)
            .await?
            .ok_or(RemediationError::NotFound { id: id_str })
    }
}
