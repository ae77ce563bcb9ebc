//! The call-and-decode contract.

use codereadr_protocol::{
    decode, decode_envelope, encode_request, Action, Parameters, Section, Transport,
};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::{ClientConfig, ClientError, HttpTransport};

/// A client for the CodeREADr API.
///
/// Holds an immutable [`ClientConfig`] and a [`Transport`]. Calls share no
/// mutable state, so one client may serve any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct CodeReadrClient<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl CodeReadrClient<HttpTransport> {
    /// Creates a client that talks HTTPS via [`HttpTransport`].
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self { config, transport })
    }

    /// Creates a client from [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> CodeReadrClient<T> {
    /// Creates a client over any [`Transport`].
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The transport every call is sent through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Performs a call and decodes the response into `R`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Transport`] if no response was received.
    /// - [`ClientError::Response`] if the server reported failure or the
    ///   response does not fit `R`.
    pub async fn call<R: DeserializeOwned>(
        &self,
        section: Section,
        action: Action,
        parameters: &Parameters,
    ) -> Result<R, ClientError> {
        let raw = self.send(section, action, parameters).await?;
        Ok(decode(&raw)?)
    }

    /// Performs a call whose response carries no payload of interest.
    pub async fn execute(
        &self,
        section: Section,
        action: Action,
        parameters: &Parameters,
    ) -> Result<(), ClientError> {
        self.call_raw(section, action, parameters).await.map(|_| ())
    }

    /// Performs a call and returns the raw XML once the envelope reports
    /// success.
    pub async fn call_raw(
        &self,
        section: Section,
        action: Action,
        parameters: &Parameters,
    ) -> Result<Vec<u8>, ClientError> {
        let raw = self.send(section, action, parameters).await?;
        decode_envelope(&raw)?;
        Ok(raw)
    }

    #[instrument(
        name = "codereadr.call",
        skip_all,
        fields(section = %section, action = %action, parameters = parameters.len())
    )]
    async fn send(
        &self,
        section: Section,
        action: Action,
        parameters: &Parameters,
    ) -> Result<Vec<u8>, ClientError> {
        let request = encode_request(
            self.config.api_key(),
            section.as_str(),
            action.as_str(),
            parameters,
        );
        let response = self
            .transport
            .send(self.config.endpoint(), &request)
            .await?;
        Ok(response.body)
    }
}
