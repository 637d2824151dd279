//! This crate manages the lifecycle of subscription-scoped policy remediations:
//! - Remote remediation model and the client seam it is fetched through
//! - Create/update, read and delete operations with NotFound idempotence
//! - Cancellation-aware deletion for remediations that re-evaluate compliance
//!

mod arm;
pub mod commands;
mod config;
mod error;
mod types;
pub mod waiter;

// Re-exports for a small, focused public API
pub use arm::client::RemediationsClient;
pub use arm::id::RemediationId;
pub use arm::{ClientError, ClientResult};
pub use commands::RemediationService;
pub use config::{RemediationSettings, Timeouts};
pub use error::{RemediationError, RemediationResult};
pub use types::{
    FailureThreshold, Remediation, RemediationFilters, RemediationProperties, RemediationState,
    ResourceDiscoveryMode, SubscriptionPolicyRemediation,
};
pub use waiter::{wait_for_delete, CancelAction, Deadline, PollResult, StateRefresh, WaiterConfig};
