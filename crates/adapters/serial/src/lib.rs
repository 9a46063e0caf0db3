//! # greenhouse-adapter-serial
//!
//! Serial transport between the bridge and the greenhouse controller.
//!
//! ## Responsibilities
//! - Open the serial port described by [`SerialConfig`]
//! - Run a dedicated reader thread that frames incoming bytes into report
//!   lines and feeds them to the ingestion loop over a bounded channel
//! - Implement the `ActuatorChannel` port by writing newline-terminated
//!   command lines to the same port
//!
//! ## Dependency rule
//! Depends on `greenhouse-app` (for the `ActuatorChannel` port) and
//! `greenhouse-domain` (for `BridgeError`). The `serialport` types stay
//! inside this crate.

pub mod actuator;
pub mod config;
pub mod error;
pub mod framer;
pub mod reader;

use serialport::SerialPort;
use tokio::sync::mpsc;

pub use actuator::SerialActuator;
pub use config::SerialConfig;
pub use error::SerialError;

/// Capacity of the report line channel between the reader thread and the
/// ingestion loop.
pub const LINE_CHANNEL_CAPACITY: usize = 32;

/// Open the port and start the reader thread.
///
/// Returns the receiving end of the report line channel and the actuator
/// writing to the same port. The reader thread exits once the receiver is
/// dropped.
///
/// # Errors
///
/// Returns [`SerialError::Open`] if the port cannot be opened or cloned, and
/// [`SerialError::Io`] if the reader thread cannot be spawned.
pub fn connect(
    config: &SerialConfig,
) -> Result<(mpsc::Receiver<String>, SerialActuator<Box<dyn SerialPort>>), SerialError> {
    let port = serialport::new(&config.path, config.baud_rate)
        .timeout(config.read_timeout())
        .open()
        .map_err(SerialError::Open)?;
    let writer = port.try_clone().map_err(SerialError::Open)?;

    tracing::info!(
        path = %config.path,
        baud_rate = config.baud_rate,
        "serial port opened"
    );

    let (tx, rx) = mpsc::channel(LINE_CHANNEL_CAPACITY);
    reader::spawn(port, tx).map_err(SerialError::Io)?;

    Ok((rx, SerialActuator::new(writer)))
}
