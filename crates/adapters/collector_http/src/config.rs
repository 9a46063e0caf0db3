//! Collector configuration.

use std::time::Duration;

use serde::Deserialize;

use greenhouse_domain::forwarding::DEFAULT_FORWARD_INTERVAL;

/// Configuration for forwarding snapshots to the remote collector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Collector endpoint. Forwarding is disabled when absent.
    pub url: Option<String>,
    /// Bearer token sent with every push.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Minimum delay between two pushes, in seconds.
    pub interval_secs: u64,
}

impl CollectorConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: String::new(),
            timeout_secs: 10,
            interval_secs: DEFAULT_FORWARD_INTERVAL.as_secs(),
        }
    }
}
