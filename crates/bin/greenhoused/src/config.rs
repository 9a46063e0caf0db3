//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `greenhouse.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use greenhouse_adapter_collector_http::CollectorConfig;
use greenhouse_adapter_serial::SerialConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Serial link to the controller.
    pub serial: SerialConfig,
    /// Identity of this bridge.
    pub device: DeviceConfig,
    /// Remote collector; forwarding is off without a URL.
    pub collector: CollectorConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Device identity.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Reported as `deviceId` in every payload.
    pub id: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `greenhouse.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("greenhouse.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("GREENHOUSE_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("GREENHOUSE_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("GREENHOUSE_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("GREENHOUSE_SERIAL_PORT") {
            self.serial.path = val;
        }
        if let Some(baud) = var("GREENHOUSE_SERIAL_BAUD").and_then(|val| val.parse().ok()) {
            self.serial.baud_rate = baud;
        }
        if let Some(val) = var("GREENHOUSE_DEVICE_ID") {
            self.device.id = val;
        }
        if let Some(val) = var("GREENHOUSE_COLLECTOR_URL") {
            self.collector.url = Some(val).filter(|url| !url.is_empty());
        }
        if let Some(val) = var("GREENHOUSE_COLLECTOR_API_KEY") {
            self.collector.api_key = val;
        }
        if let Some(val) = var("GREENHOUSE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.serial.baud_rate == 0 {
            return Err(ConfigError::Validation(
                "serial baud rate must be non-zero".to_string(),
            ));
        }
        if self.collector.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "collector interval must be non-zero".to_string(),
            ));
        }
        if self.collector.url.is_some() && self.collector.api_key.is_empty() {
            return Err(ConfigError::Validation(
                "collector api_key is required when a collector url is set".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            id: "greenhouse-bridge".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "greenhoused=info,greenhouse_app=info,greenhouse_adapter_serial=info,greenhouse_adapter_collector_http=info,greenhouse_adapter_http_axum=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
