//! Client-level error type.

use codereadr_protocol::{ResponseError, TransportError};
use thiserror::Error;

/// Everything that can make a call fail.
///
/// Nothing is retried or logged by the client; every failure is returned
/// to the caller as one of these variants.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server reported failure, or its response did not decode.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// The client could not be configured.
    ///
    /// Produced at construction time; a client never exists with an invalid
    /// configuration.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

impl ClientError {
    /// Returns `(code, message)` when the server reported the failure.
    pub fn api_error(&self) -> Option<(i64, &str)> {
        match self {
            ClientError::Response(err) => err.api_error(),
            _ => None,
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        ClientError::Configuration {
            message: message.into(),
        }
    }
}
