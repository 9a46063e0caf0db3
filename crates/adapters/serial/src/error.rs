//! Serial adapter error types.

use greenhouse_domain::error::BridgeError;

/// Errors specific to the serial adapter.
#[derive(Debug, thiserror::Error)]
pub enum SerialError {
    /// The port could not be opened or cloned.
    #[error("failed to open serial port")]
    Open(#[source] serialport::Error),

    /// Reading from or writing to the port failed.
    #[error("serial I/O error")]
    Io(#[source] std::io::Error),

    /// The writer task ended before the line was written.
    #[error("serial port closed")]
    Closed,

    /// A previous writer panicked while holding the port.
    #[error("serial port lock poisoned")]
    LockPoisoned,
}

impl SerialError {
    /// Convert into a [`BridgeError::Actuator`] for propagation across port
    /// boundaries.
    pub fn into_domain(self) -> BridgeError {
        BridgeError::Actuator(Box::new(self))
    }
}

impl From<SerialError> for BridgeError {
    fn from(err: SerialError) -> Self {
        err.into_domain()
    }
}
