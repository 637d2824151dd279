//! Absolute deadlines with an attached stop signal.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{RemediationError, RemediationResult};

/// An absolute point in time by which an operation must finish, plus a stop
/// signal that ends it early.
///
/// Cloning a deadline shares the stop signal.
#[derive(Debug, Clone)]
pub struct Deadline {
    at: Instant,
    stop: CancellationToken,
}

impl Deadline {
    pub fn after(timeout: Duration) -> Self {
        Self::at(Instant::now() + timeout)
    }

    pub fn at(at: Instant) -> Self {
        Self {
            at,
            stop: CancellationToken::new(),
        }
    }

    /// Attach an external stop signal, replacing the private one.
    #[must_use]
    pub fn with_stop_signal(mut self, stop: CancellationToken) -> Self {
        self.stop = stop;
        self
    }

    pub fn instant(&self) -> Instant {
        self.at
    }

    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn has_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    pub fn stop_signal(&self) -> &CancellationToken {
        &self.stop
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_cancelled()
    }

    /// Run `operation` until it completes, the deadline passes, or the stop signal fires.
    pub async fn run<T, F>(&self, operation: &'static str, id: &str, fut: F) -> RemediationResult<T>
    where
        F: Future<Output = RemediationResult<T>>,
    {
        let started = Instant::now();
        tokio::select! {
            biased;
            () = self.stop.cancelled() => Err(RemediationError::Interrupted { id: id.to_string() }),
            result = tokio::time::timeout_at(self.at, fut) => match result {
                Ok(result) => result,
                Err(_) => Err(RemediationError::Timeout {
                    operation,
                    id: id.to_string(),
                    elapsed: started.elapsed(),
                    last_state: None,
                }),
            },
        }
    }
}
