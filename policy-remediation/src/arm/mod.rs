//! Azure Resource Manager seam: remediation client trait and resource identifiers.

pub(crate) mod client;
pub mod id;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("remote entity was not found")]
    NotFound,
    #[error("request failed: {0}")]
    Request(String),
    #[error("`{0}` was nil")]
    MissingField(&'static str),
}

impl ClientError {
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request(message.into())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
