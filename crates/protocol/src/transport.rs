//! The transport port.
//!
//! The protocol layer never performs I/O itself. A [`Transport`] delivers an
//! encoded [`MultipartBody`] with a single POST and hands back the raw
//! response. Timeout and cancellation policy belong to the implementation;
//! the protocol layer performs no retries.

use async_trait::async_trait;
use thiserror::Error;

use crate::MultipartBody;

/// Raw response returned by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code. Not interpreted: the body is always decoded.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

/// The request could not be delivered or the response could not be read.
#[derive(Debug, Error)]
#[error("Transport failure sending request to {url}")]
pub struct TransportError {
    /// Endpoint the request was addressed to.
    pub url: String,
    /// Underlying cause, as reported by the transport implementation.
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl TransportError {
    /// Creates an error for `url` wrapping any error-like cause.
    pub fn new(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            url: url.into(),
            source: source.into(),
        }
    }
}

/// Sends one encoded request and returns the raw response.
///
/// Implementations must be safe to share between concurrent calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs `request` to `url` with `request.content_type()` as the
    /// `Content-Type` header.
    async fn send(
        &self,
        url: &str,
        request: &MultipartBody,
    ) -> Result<TransportResponse, TransportError>;
}
