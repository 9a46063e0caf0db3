//! Actuator channel port: the outbound command line to the controller.

use std::future::Future;

use tokio::sync::mpsc;

use greenhouse_domain::error::BridgeError;

/// Carries one command line at a time to the greenhouse controller.
///
/// Fire-and-forget: a successful return means the line was handed to the
/// transport, not that the controller acted on it.
pub trait ActuatorChannel {
    /// Write `line` followed by the transport's line terminator.
    fn send_line(&self, line: &str) -> impl Future<Output = Result<(), BridgeError>> + Send;
}

impl<T: ActuatorChannel + Send + Sync> ActuatorChannel for std::sync::Arc<T> {
    fn send_line(&self, line: &str) -> impl Future<Output = Result<(), BridgeError>> + Send {
        (**self).send_line(line)
    }
}

/// Lines handed to an in-process consumer (a transport writer task, or a test).
impl ActuatorChannel for mpsc::Sender<String> {
    async fn send_line(&self, line: &str) -> Result<(), BridgeError> {
        self.send(line.to_string())
            .await
            .map_err(|err| BridgeError::Actuator(Box::new(err)))
    }
}
