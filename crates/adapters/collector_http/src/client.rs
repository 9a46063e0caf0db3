//! `reqwest`-backed implementation of the `TelemetryCollector` port.

use std::time::Duration;

use greenhouse_app::ports::TelemetryCollector;
use greenhouse_domain::error::BridgeError;
use greenhouse_domain::payload::TelemetryPayload;

use crate::config::CollectorConfig;
use crate::error::CollectorError;

const USER_AGENT: &str = concat!("greenhouse-bridge/", env!("CARGO_PKG_VERSION"));

/// Pushes payloads to one collector endpoint.
#[derive(Debug, Clone)]
pub struct HttpCollector {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl HttpCollector {
    /// Create a collector client posting to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Client`] if the TLS backend cannot be
    /// initialised.
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CollectorError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(CollectorError::Client)?;
        Ok(Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        })
    }

    /// Build the collector described by `config`, or `None` when no URL is
    /// configured.
    ///
    /// # Errors
    ///
    /// Same as [`HttpCollector::new`].
    pub fn from_config(config: &CollectorConfig) -> Result<Option<Self>, CollectorError> {
        config
            .url
            .as_deref()
            .map(|url| Self::new(url, config.api_key.as_str(), config.timeout()))
            .transpose()
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(&self, payload: &TelemetryPayload) -> Result<(), CollectorError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(CollectorError::Request)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(CollectorError::Rejected { status })
        }
    }
}

impl TelemetryCollector for HttpCollector {
    #[tracing::instrument(skip(self, payload), fields(url = %self.url))]
    async fn push(&self, payload: &TelemetryPayload) -> Result<(), BridgeError> {
        self.post(payload).await?;
        tracing::debug!("payload accepted by collector");
        Ok(())
    }
}
