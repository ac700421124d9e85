//! Typed error enum for the client crate.

use prompt_curator_core::wire::RpcErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, TLS.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with an error envelope.
    #[error("{code}: {message}")]
    Rpc { code: RpcErrorCode, message: String },
    /// The response was neither a success nor an error envelope.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Whether retrying the same call might succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout(),
            Self::Rpc { code, .. } => *code == RpcErrorCode::InternalServerError,
            Self::Decode(_) => false,
        }
    }
}
