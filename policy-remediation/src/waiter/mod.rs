//! Cancellation-aware deletion waiter.
//!
//! A remediation created with `ReEvaluateCompliance` discovery keeps evaluating
//! after creation and cannot be deleted while it runs. Before deletion it is
//! cancelled once, then its provisioning state is polled at a fixed interval
//! until it reaches a terminal state, a refresh fails, or the deadline passes.
//! Remediations in any other discovery mode are deleted directly.

mod deadline;

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::arm::ClientResult;
use crate::error::{RemediationError, RemediationResult};
use crate::types::{RemediationProperties, ResourceDiscoveryMode};

pub use deadline::Deadline;

const CANCEL_OPERATION: &str = "cancelling";
const WAIT_OPERATION: &str = "waiting for cancellation of";

/// One observation of remote state.
#[derive(Debug, Clone, PartialEq)]
pub struct PollResult<S> {
    pub snapshot: S,
    pub state: String,
}

/// Fetches the current remote state. Called repeatedly while waiting.
#[async_trait]
pub trait StateRefresh: Send {
    type Snapshot: Send;

    async fn refresh(&mut self) -> ClientResult<PollResult<Self::Snapshot>>;
}

/// Requests cancellation of the remote operation.
#[async_trait]
pub trait CancelAction: Sync {
    async fn cancel(&self) -> ClientResult<()>;
}

/// Polling behaviour of the deletion waiter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaiterConfig {
    #[serde(with = "crate::config::duration_secs")]
    pub poll_interval: Duration,
    /// States that end the wait successfully.
    pub target_states: Vec<String>,
    /// States that end the wait with [`RemediationError::TerminalFailure`].
    pub failure_states: Vec<String>,
}

impl Default for WaiterConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            target_states: ["Succeeded", "Canceled", "Cancelled", "Failed"]
                .into_iter()
                .map(String::from)
                .collect(),
            failure_states: Vec::new(),
        }
    }
}

impl WaiterConfig {
    /// Reject settings that would make the wait spin or never end.
    pub fn validate(&self) -> RemediationResult<()> {
        if self.poll_interval.is_zero() {
            return Err(RemediationError::config("waiter.poll_interval must be positive"));
        }
        if self.target_states.is_empty() {
            return Err(RemediationError::config(
                "waiter.target_states must name at least one state",
            ));
        }
        Ok(())
    }

    fn is_failure(&self, state: &str) -> bool {
        self.failure_states.iter().any(|s| s == state)
    }

    fn is_terminal(&self, state: &str) -> bool {
        self.is_failure(state) || self.target_states.iter().any(|s| s == state)
    }
}

/// Cancel a remediation and wait until it settles so it can be deleted.
///
/// Returns immediately when `properties` is `None` (already gone) or the
/// discovery mode is not `ReEvaluateCompliance`. Otherwise `cancel` runs exactly
/// once and `refresh` runs until a terminal state is seen. Any cancel or refresh
/// error ends the wait without retrying. The cancel request is bounded by the
/// same deadline and stop signal as the polls.
pub async fn wait_for_delete<C, R>(
    properties: Option<&RemediationProperties>,
    id: &str,
    deadline: &Deadline,
    config: &WaiterConfig,
    cancel: &C,
    refresh: &mut R,
) -> RemediationResult<()>
where
    C: CancelAction + ?Sized,
    R: StateRefresh + ?Sized,
{
    let Some(properties) = properties else {
        return Ok(());
    };
    if properties.discovery_mode() != ResourceDiscoveryMode::ReEvaluateCompliance {
        return Ok(());
    }

    config.validate()?;

    debug!(
        "cancelling {} before deleting it as `resource_discovery_mode` is {}",
        id,
        ResourceDiscoveryMode::ReEvaluateCompliance
    );
    deadline
        .run(CANCEL_OPERATION, id, async {
            cancel
                .cancel()
                .await
                .map_err(|source| RemediationError::CancelFailed {
                    id: id.to_string(),
                    source,
                })
        })
        .await?;

    debug!(
        "waiting up to {:?} for {} to be cancelled",
        deadline.remaining(),
        id
    );
    let started = Instant::now();
    let mut last_state: Option<String> = None;
    let timed_out = |last_state: Option<String>| RemediationError::Timeout {
        operation: WAIT_OPERATION,
        id: id.to_string(),
        elapsed: started.elapsed(),
        last_state,
    };
    let interrupted = || RemediationError::Interrupted { id: id.to_string() };

    loop {
        if deadline.is_stopped() {
            return Err(interrupted());
        }
        if deadline.has_expired() {
            return Err(timed_out(last_state));
        }

        let polled = tokio::select! {
            biased;
            () = deadline.stop_signal().cancelled() => return Err(interrupted()),
            polled = tokio::time::timeout_at(deadline.instant(), refresh.refresh()) => polled,
        };
        let Ok(polled) = polled else {
            return Err(timed_out(last_state));
        };
        let PollResult { state, .. } = polled.map_err(|source| RemediationError::RefreshFailed {
            id: id.to_string(),
            source,
        })?;
        trace!("{} is in state {:?}", id, state);

        if config.is_terminal(&state) {
            if config.is_failure(&state) {
                return Err(RemediationError::TerminalFailure {
                    id: id.to_string(),
                    state,
                });
            }
            debug!(
                "{} reached state {:?} after {:?}",
                id,
                state,
                started.elapsed()
            );
            return Ok(());
        }
        last_state = Some(state);

        let wake = (Instant::now() + config.poll_interval).min(deadline.instant());
        tokio::select! {
            biased;
            () = deadline.stop_signal().cancelled() => return Err(interrupted()),
            () = tokio::time::sleep_until(wake) => {}
        }
    }
}
