//! Upstream provider client for the Moolax FX gateway.
//!
//! Fetches the latest exchange rates from a fixer.io-compatible endpoint
//! and validates the response envelope. No caching happens here; that is
//! the resolver's responsibility, which keeps this client independently
//! testable against a mocked transport.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use moolax_core::RateSnapshot;

/// Configuration for the upstream client.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the provider; `/api/latest` is appended.
    pub base_url: Url,

    /// Credential sent as the `access_key` query parameter.
    pub access_key: String,

    /// Bound on the outbound request (default: 10 seconds). The provider
    /// imposes no bound of its own, and a hung fetch would otherwise tie
    /// up the inbound request for as long as the host allows.
    pub request_timeout: Duration,
}

impl UpstreamConfig {
    #[must_use]
    pub fn new(base_url: Url, access_key: impl Into<String>) -> Self {
        Self {
            base_url,
            access_key: access_key.into(),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Sets the outbound request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Errors from the upstream fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be completed at the transport level.
    #[error("upstream request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-success HTTP status.
    #[error("upstream server failed with status {0}")]
    UpstreamUnavailable(u16),

    /// The response body was not valid JSON.
    #[error("invalid upstream payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// The body parsed but the provider flagged the request as failed.
    #[error("provider rejected request: {0}")]
    ProviderRejected(serde_json::Value),
}

/// Source of latest-rate snapshots.
///
/// The resolver holds this as a trait object so tests can script the
/// provider without a network.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches and validates the latest rates payload.
    async fn fetch_latest(&self) -> Result<RateSnapshot, FetchError>;
}

/// HTTP client for a fixer.io-compatible rates API.
pub struct FixerClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl FixerClient {
    /// Creates a client with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should not happen in
    /// practice).
    #[must_use]
    pub fn new(config: UpstreamConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { http, config }
    }

    /// The latest-rates endpoint, without the credential.
    fn endpoint(&self) -> Url {
        let mut url = self.config.base_url.clone();
        let path = url.path().trim_end_matches('/');
        url.set_path(&format!("{path}/api/latest"));
        url
    }
}

#[async_trait]
impl RateProvider for FixerClient {
    async fn fetch_latest(&self) -> Result<RateSnapshot, FetchError> {
        let mut url = self.endpoint();
        url.query_pairs_mut()
            .append_pair("access_key", &self.config.access_key);

        // Log the host only; the full URL carries the credential.
        tracing::debug!(
            host = url.host_str().unwrap_or("<none>"),
            "contacting upstream provider"
        );

        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::UpstreamUnavailable(response.status().as_u16()));
        }

        let body = response.text().await?;
        let snapshot = RateSnapshot::from_string(body)?;

        let envelope = snapshot.envelope()?;
        if !envelope.success {
            let payload = envelope.error.unwrap_or(serde_json::Value::Null);
            tracing::warn!(error = %payload, "upstream provider rejected request");
            return Err(FetchError::ProviderRejected(payload));
        }

        Ok(snapshot)
    }
}
