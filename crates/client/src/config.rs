//! Client configuration.
//!
//! Loaded once at construction time and immutable afterwards. The credential
//! lives here, per client instance, rather than in any process-wide state.

use std::time::Duration;

use codereadr_protocol::ApiKey;

use crate::ClientError;

/// Production API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.codereadr.com/api/";

/// Per-request timeout applied by [`crate::HttpTransport`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "CODEREADR_API_KEY";

/// Environment variable overriding [`DEFAULT_ENDPOINT`].
pub const ENDPOINT_ENV: &str = "CODEREADR_ENDPOINT";

/// Environment variable overriding [`DEFAULT_TIMEOUT`], in whole seconds.
pub const TIMEOUT_ENV: &str = "CODEREADR_TIMEOUT_SECS";

/// Settings for one [`crate::CodeReadrClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: ApiKey,
    endpoint: String,
    timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration for the production endpoint.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the endpoint URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads [`API_KEY_ENV`] (required), [`ENDPOINT_ENV`], and [`TIMEOUT_ENV`].
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .and_then(ApiKey::new)
            .ok_or_else(|| ClientError::configuration(format!("{API_KEY_ENV} is not set")))?;

        let mut config = Self::new(api_key);

        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|e| !e.is_empty()) {
            config = config.with_endpoint(endpoint);
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ClientError::configuration(format!(
                    "{TIMEOUT_ENV} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// The credential attached to every call.
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// The URL every call is POSTed to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The whole-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_the_key_is_set() {
        let config = ClientConfig::from_lookup(lookup(&[(API_KEY_ENV, "abc")])).unwrap();
        assert_eq!(config.api_key().as_str(), "abc");
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn overrides_are_read() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_KEY_ENV, "abc"),
            (ENDPOINT_ENV, "http://localhost:8080/api/"),
            (TIMEOUT_ENV, "5"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint(), "http://localhost:8080/api/");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn missing_or_empty_key_is_a_configuration_error() {
        for vars in [&[][..], &[(API_KEY_ENV, "")][..]] {
            let err = ClientConfig::from_lookup(lookup(vars)).unwrap_err();
            assert!(matches!(err, ClientError::Configuration { .. }));
        }
    }

    #[test]
    fn non_numeric_timeout_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(API_KEY_ENV, "abc"), (TIMEOUT_ENV, "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_ENV));
    }
}
