//! Client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, bad TLS, ...
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the token or credentials (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Any other non-success status, with the server's `message`.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A success body that does not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ClientError {
    /// HTTP status for server-side rejections.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
