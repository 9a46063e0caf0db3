//! Serial port configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the serial link to the controller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyUSB0` or `COM3`.
    pub path: String,
    /// Line speed in baud.
    pub baud_rate: u32,
    /// Read timeout in milliseconds. The reader thread polls at this rate.
    pub read_timeout_ms: u64,
}

impl SerialConfig {
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            path: "/dev/ttyUSB0".to_string(),
            baud_rate: 9600,
            read_timeout_ms: 100,
        }
    }
}
