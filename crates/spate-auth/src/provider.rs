//! Bearer token acquisition with a cached-token policy.

use chrono::{DateTime, Utc};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::{CacheError, CachedToken, TokenCache};

/// Endpoint that exchanges an access key for a bearer token.
pub const TOKEN_URL: &str =
    "https://timeseries.sepa.org.uk/KiWebPortal/rest/auth/oidcServer/token";

/// How long an issued token is trusted, in seconds (23 hours).
///
/// Tokens issued by the service expire after 24 hours; a cached token is
/// reused for at most 23 so it never expires mid-download.
pub const TOKEN_TTL_SECONDS: i64 = 82_800;

/// Errors that can occur obtaining a bearer token.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The token endpoint request failed.
    #[error("Token exchange failed: {0}")]
    Exchange(#[from] reqwest::Error),

    /// The token endpoint returned a non-success status.
    #[error("Token endpoint returned status {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },

    /// The response body was not the expected JSON object.
    #[error("Malformed token response: {0}")]
    MalformedResponse(String),

    /// The exchange succeeded but carried no usable token.
    #[error("Token response contained no usable access token")]
    EmptyToken,

    /// The token cache could not be updated.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Result type for token operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Exchanges a long-lived access key for a short-lived bearer token.
pub trait TokenExchange {
    /// Requests a fresh token using the given access key.
    fn exchange(&self, access_key: &str) -> impl Future<Output = Result<String>> + Send;
}

/// [`TokenExchange`] implementation backed by the real token endpoint.
///
/// The access key is presented as HTTP basic credentials and the request
/// body asks for the `client_credentials` grant.
#[derive(Debug, Clone)]
pub struct HttpTokenExchange {
    client: reqwest::Client,
    token_url: String,
}

impl HttpTokenExchange {
    /// Creates an exchanger talking to [`TOKEN_URL`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> std::result::Result<Self, reqwest::Error> {
        Self::with_token_url(TOKEN_URL)
    }

    /// Creates an exchanger talking to a custom endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_token_url(
        token_url: impl Into<String>,
    ) -> std::result::Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("spate/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            token_url: token_url.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl TokenExchange for HttpTokenExchange {
    async fn exchange(&self, access_key: &str) -> Result<String> {
        info!("requesting a new access token");

        let response = self
            .client
            .post(&self.token_url)
            .header(AUTHORIZATION, format!("Basic {access_key}"))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Status {
                status: status.as_u16(),
            });
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        Ok(body.access_token)
    }
}

/// Supplies bearer tokens, reusing a cached token while it is fresh.
///
/// Exactly one exchange happens per expiry period no matter how many
/// requests a download makes: a token no older than 23 hours is served
/// from the cache, anything older triggers a single refresh that is
/// persisted before being returned.
#[derive(Debug)]
pub struct TokenProvider<E = HttpTokenExchange> {
    cache: TokenCache,
    exchange: E,
}

impl<E: TokenExchange> TokenProvider<E> {
    /// Creates a provider over the given cache and exchanger.
    #[must_use]
    pub const fn new(cache: TokenCache, exchange: E) -> Self {
        Self { cache, exchange }
    }

    /// Returns the cache backing this provider.
    #[must_use]
    pub const fn cache(&self) -> &TokenCache {
        &self.cache
    }

    /// Returns a bearer token for the given access key.
    ///
    /// # Errors
    ///
    /// Returns an error if a refresh is needed and the exchange fails or
    /// the new token cannot be persisted.
    pub async fn get_token(&self, access_key: &str) -> Result<String> {
        self.get_token_at(access_key, Utc::now()).await
    }

    /// Clock-injected variant of [`get_token`](Self::get_token).
    ///
    /// # Errors
    ///
    /// Same as [`get_token`](Self::get_token).
    pub async fn get_token_at(&self, access_key: &str, now: DateTime<Utc>) -> Result<String> {
        if let Some(cached) = self.cache.load() {
            if is_fresh(now, cached.issued_at) {
                debug!("cached access token is fresh, reusing it");
                return Ok(cached.access_token);
            }
            info!("cached access token expired, requesting a new one");
        }

        let access_token = self.exchange.exchange(access_key).await?;
        if access_token.is_empty() {
            return Err(AuthError::EmptyToken);
        }

        self.cache.store(&CachedToken {
            access_token: access_token.clone(),
            issued_at: now,
        })?;

        Ok(access_token)
    }
}

/// Returns true while a token issued at `issued_at` is still trusted at
/// `now`.
///
/// The boundary is inclusive: a token aged exactly 23 hours is fresh.
#[must_use]
pub fn is_fresh(now: DateTime<Utc>, issued_at: DateTime<Utc>) -> bool {
    now.signed_duration_since(issued_at).num_seconds() <= TOKEN_TTL_SECONDS
}
