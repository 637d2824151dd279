//! Read logic for the remediation service

use log::info;

use crate::arm::client::find_remediation;
use crate::arm::id::RemediationId;
use crate::error::{RemediationError, RemediationResult};
use crate::types::RemediationState;

impl super::service::RemediationService {
    /// Read the current state of a remediation.
    ///
    /// Returns `None` when the remediation no longer exists so the caller can drop
    /// it from its state.
    pub async fn read(&self, id: &RemediationId) -> RemediationResult<Option<RemediationState>> {
        let id_str = id.to_string();
        let deadline = self.deadline(self.settings.timeouts.read);

        deadline
            .run("reading", &id_str, async {
                let Some(remediation) = find_remediation(self.client.as_ref(), id)
                    .await
                    .map_err(|e| RemediationError::client("reading", id, e))?
                else {
                    info!("{} does not exist - removing from state", id);
                    return Ok(None);
                };

                let properties = remediation
                    .properties
                    .ok_or_else(|| RemediationError::MissingField {
                        id: id_str.clone(),
                        field: "properties",
                    })?;

                Ok::<_, RemediationError>(Some(RemediationState::from_properties(
                    id,
                    &properties,
                )))
            })
            .await
    }
}
