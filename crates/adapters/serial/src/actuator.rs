//! Actuator channel writing command lines to the serial port.

use std::io::Write;
use std::sync::{Arc, Mutex};

use greenhouse_app::ports::ActuatorChannel;
use greenhouse_domain::error::BridgeError;

use crate::error::SerialError;

/// Writes each command as one `\n`-terminated line.
///
/// Writes run on the blocking pool and are serialized by a mutex, so two
/// concurrent commands never interleave on the wire.
pub struct SerialActuator<W> {
    port: Arc<Mutex<W>>,
}

impl<W> SerialActuator<W> {
    pub fn new(port: W) -> Self {
        Self {
            port: Arc::new(Mutex::new(port)),
        }
    }
}

impl<W> ActuatorChannel for SerialActuator<W>
where
    W: Write + Send + 'static,
{
    async fn send_line(&self, line: &str) -> Result<(), BridgeError> {
        let port = Arc::clone(&self.port);
        let framed = format!("{line}\n");

        tokio::task::spawn_blocking(move || {
            let mut port = port.lock().map_err(|_| SerialError::LockPoisoned)?;
            port.write_all(framed.as_bytes()).map_err(SerialError::Io)?;
            port.flush().map_err(SerialError::Io)
        })
        .await
        .map_err(|_| SerialError::Closed)??;

        tracing::debug!(line, "command line written to serial port");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    struct BrokenPort;

    impl Write for BrokenPort {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn should_write_newline_terminated_lines() {
        let actuator = SerialActuator::new(Vec::<u8>::new());
        actuator.send_line("WATER:AUTO").await.unwrap();
        actuator.send_line("FAN:MANUAL:OFF").await.unwrap();

        let written = actuator.port.lock().unwrap().clone();
        assert_eq!(written, b"WATER:AUTO\nFAN:MANUAL:OFF\n");
    }

    #[tokio::test]
    async fn should_report_write_failure_as_actuator_error() {
        let actuator = SerialActuator::new(BrokenPort);
        let err = actuator.send_line("FAN:AUTO").await.unwrap_err();
        assert!(matches!(err, BridgeError::Actuator(_)));
    }
}
