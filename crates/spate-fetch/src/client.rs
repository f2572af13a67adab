//! HTTP client for the time-series API.

use reqwest::Client;
use spate_types::SpateError;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout (separate from request timeout).
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("spate/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur fetching data.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed or returned an error status.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The daily request quota is spent.
    ///
    /// The service signals this inside an HTTP 200 response; marker text
    /// in the first body line is the only indication. The failure is
    /// fatal to the surrounding download and never retried.
    #[error("Credit limit exceeded: {detail}")]
    QuotaExceeded {
        /// The first response line, which carries the marker.
        detail: String,
    },
}

impl From<FetchError> for SpateError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Transport(e) => Self::Transport(e.to_string()),
            FetchError::QuotaExceeded { detail } => Self::QuotaExceeded(detail),
        }
    }
}

/// Thin HTTP client for the CSV query endpoints.
///
/// One GET per call, no retries: a failed request fails the download it
/// belongs to.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Creates a new API client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            // Keep the connection alive across the sequential window requests
            .tcp_keepalive(Duration::from_secs(60))
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issues a single GET and returns the CSV body.
    ///
    /// The bearer header is attached only when a credential is supplied;
    /// without one the request falls into the unregistered quota class.
    ///
    /// # Errors
    ///
    /// Returns an error on any transport failure or non-success status.
    pub async fn get_csv(&self, url: &str, bearer: Option<&str>) -> Result<String, FetchError> {
        debug!(%url, "GET");

        let mut request = self.client.get(url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("spate/"));
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = ApiClient::with_defaults();
        assert!(client.is_ok());
    }

    #[test]
    fn test_fetch_error_converts_to_spate_error() {
        let err = FetchError::QuotaExceeded {
            detail: "Credit limit exceeded for key".to_string(),
        };
        assert!(matches!(SpateError::from(err), SpateError::QuotaExceeded(_)));
    }
}
