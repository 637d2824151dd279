//! Remediation Service Layer
//!
//! The service holds an injected remediations client, the operation settings and
//! a stop signal shared by every deadline it creates. It exposes the resource
//! lifecycle (create/update, read, delete) without any ambient client state.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::arm::client::RemediationsClient;
use crate::config::RemediationSettings;
use crate::waiter::Deadline;

/// Main service struct for subscription policy remediations
pub struct RemediationService {
    pub(crate) client: Arc<dyn RemediationsClient>,
    pub(crate) settings: RemediationSettings,
    stop: CancellationToken,
}

impl RemediationService {
    pub fn new(client: Arc<dyn RemediationsClient>, settings: RemediationSettings) -> Self {
        Self {
            client,
            settings,
            stop: CancellationToken::new(),
        }
    }

    /// Share an external stop signal; cancelling it interrupts in-flight operations.
    #[must_use]
    pub fn with_stop_signal(mut self, stop: CancellationToken) -> Self {
        self.stop = stop;
        self
    }

    pub(crate) fn deadline(&self, timeout: Duration) -> Deadline {
        Deadline::after(timeout).with_stop_signal(self.stop.clone())
    }

    // create_or_update() is in create.rs
    // read() is in read.rs
    // delete() is in delete.rs
}
