//! [`Transport`] implementation over `reqwest`.

use async_trait::async_trait;
use codereadr_protocol::{MultipartBody, Transport, TransportError, TransportResponse};
use reqwest::header::CONTENT_TYPE;

use crate::{ClientConfig, ClientError};

/// HTTPS transport backed by one shared `reqwest::Client`.
///
/// The configured timeout covers the whole request, including reading the
/// response body.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Builds the underlying HTTP client from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::configuration(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// Wraps an existing `reqwest::Client`.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        url: &str,
        request: &MultipartBody,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, request.content_type())
            .body(request.body().to_vec())
            .send()
            .await
            .map_err(|e| TransportError::new(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::new(url, e))?;

        tracing::debug!(status, bytes = body.len(), "received response");

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}
