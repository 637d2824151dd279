//! Commands module - service layer for the remediation resource lifecycle

mod cancellation;
mod create;
mod delete;
mod read;
pub(crate) mod service;

pub use service::RemediationService;
