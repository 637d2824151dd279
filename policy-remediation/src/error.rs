//! Error types for remediation lifecycle operations.

use std::time::Duration;

use thiserror::Error;

use crate::arm::ClientError;

/// Errors surfaced by lifecycle operations and the deletion waiter.
///
/// Every variant names the resource it concerns so callers can report it as-is.
#[derive(Debug, Error)]
pub enum RemediationError {
    /// The remote entity does not exist.
    #[error("{id} was not found")]
    NotFound { id: String },

    /// Create was requested for an entity that already exists remotely.
    #[error("a resource with the ID {id:?} already exists - to be managed it needs to be imported into the state")]
    AlreadyExists { id: String },

    /// A client call failed.
    #[error("{operation} {id}: {source}")]
    Client {
        operation: &'static str,
        id: String,
        #[source]
        source: ClientError,
    },

    /// The cancellation request failed; polling never started.
    #[error("cancelling {id}: {source}")]
    CancelFailed {
        id: String,
        #[source]
        source: ClientError,
    },

    /// A state refresh failed while waiting for cancellation.
    #[error("waiting for {id} to be cancelled: {source}")]
    RefreshFailed {
        id: String,
        #[source]
        source: ClientError,
    },

    /// The deadline passed before a terminal state was observed.
    #[error("{operation} {id}: timed out after {elapsed:?} (last state: {})", .last_state.as_deref().unwrap_or("unknown"))]
    Timeout {
        operation: &'static str,
        id: String,
        elapsed: Duration,
        last_state: Option<String>,
    },

    /// A terminal state that is configured as a failure was observed.
    #[error("{id} finished in failure state {state:?}")]
    TerminalFailure { id: String, state: String },

    /// A required field was absent from a response.
    #[error("`{field}` was nil for {id}")]
    MissingField { id: String, field: &'static str },

    /// The stop signal fired before the operation completed.
    #[error("operation on {id} was interrupted")]
    Interrupted { id: String },

    /// Settings could not be loaded.
    #[error("invalid settings: {0}")]
    Config(String),
}

impl RemediationError {
    pub fn client(operation: &'static str, id: impl ToString, source: ClientError) -> Self {
        Self::Client {
            operation,
            id: id.to_string(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

pub type RemediationResult<T> = Result<T, RemediationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_context() {
        let err = RemediationError::client(
            "retrieving",
            "/subscriptions/sub/providers/Microsoft.PolicyInsights/remediations/fix",
            ClientError::request("503 Service Unavailable"),
        );
        assert_eq!(
            err.to_string(),
            "retrieving /subscriptions/sub/providers/Microsoft.PolicyInsights/remediations/fix: request failed: 503 Service Unavailable"
        );
    }

    #[test]
    fn test_timeout_message_reports_last_state() {
        let err = RemediationError::Timeout {
            operation: "waiting for cancellation of",
            id: "fix".into(),
            elapsed: Duration::from_secs(60),
            last_state: Some("Cancelling".into()),
        };
        assert_eq!(
            err.to_string(),
            "waiting for cancellation of fix: timed out after 60s (last state: Cancelling)"
        );

        let err = RemediationError::Timeout {
            operation: "reading",
            id: "fix".into(),
            elapsed: Duration::from_secs(1),
            last_state: None,
        };
        assert!(err.to_string().ends_with("(last state: unknown)"));
    }
}
