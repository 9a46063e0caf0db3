//! Command router: validates command tokens and dispatches them to the
//! actuator channel.

use greenhouse_domain::command::{Command, CommandError};
use greenhouse_domain::error::BridgeError;

use crate::ports::ActuatorChannel;

/// Application service turning inbound command tokens into actuator lines.
///
/// Only tokens matching the command grammar ever reach the controller, and
/// they are written in canonical form. Dispatching does not touch the
/// snapshot store: an actuator change becomes visible once the controller
/// reports it back.
pub struct CommandRouter<A> {
    channel: A,
}

impl<A: ActuatorChannel> CommandRouter<A> {
    /// Create a new router writing to the given actuator channel.
    pub fn new(channel: A) -> Self {
        Self { channel }
    }

    /// Validate a raw token against the command grammar.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Missing`] for blank input and
    /// [`CommandError::Invalid`] when the token does not match the grammar.
    pub fn validate_and_route(raw: &str) -> Result<Command, CommandError> {
        raw.parse()
    }

    /// Write a validated command to the actuator channel.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Actuator`] when the channel write fails.
    #[tracing::instrument(skip(self, command), fields(command = %command))]
    pub async fn dispatch(&self, command: Command) -> Result<(), BridgeError> {
        self.channel.send_line(&command.to_string()).await?;
        tracing::info!("command sent to controller");
        Ok(())
    }

    /// Validate `raw` then dispatch it, returning the accepted command.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Command`] when the token is missing or invalid
    /// (nothing is written in that case), or [`BridgeError::Actuator`] when the
    /// channel write fails.
    pub async fn submit(&self, raw: Option<&str>) -> Result<Command, BridgeError> {
        let command = Self::validate_and_route(raw.unwrap_or_default()).inspect_err(|err| {
            tracing::warn!(error = %err, "command rejected");
        })?;
        self.dispatch(command).await?;
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use greenhouse_domain::command::{Action, Power, Target};

    #[derive(Default)]
    struct RecordingChannel {
        lines: Mutex<Vec<String>>,
    }

    impl ActuatorChannel for RecordingChannel {
        async fn send_line(&self, line: &str) -> Result<(), BridgeError> {
            self.lines.lock().unwrap().push(line.to_string());
            Ok(())
        }
    }

    struct BrokenChannel;

    impl ActuatorChannel for BrokenChannel {
        async fn send_line(&self, _line: &str) -> Result<(), BridgeError> {
            Err(BridgeError::Actuator(Box::new(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "serial port unplugged",
            ))))
        }
    }

    #[test]
    fn should_route_manual_water_on() {
        let command = CommandRouter::<RecordingChannel>::validate_and_route("WATER:MANUAL:ON")
            .unwrap();
        assert_eq!(command.target, Target::Water);
        assert_eq!(command.action, Action::Manual(Power::On));
    }

    #[test]
    fn should_refuse_fertilizer_auto() {
        let err = CommandRouter::<RecordingChannel>::validate_and_route("FERTILIZER:AUTO")
            .unwrap_err();
        assert!(matches!(err, CommandError::Invalid { .. }));
    }

    #[tokio::test]
    async fn should_write_canonical_form_on_submit() {
        let router = CommandRouter::new(RecordingChannel::default());
        let command = router.submit(Some(" fan:manual:off ")).await.unwrap();

        assert_eq!(command, Command::new(Target::Fan, Action::Manual(Power::Off)));
        assert_eq!(*router.channel.lines.lock().unwrap(), vec!["FAN:MANUAL:OFF"]);
    }

    #[tokio::test]
    async fn should_not_write_invalid_command() {
        let router = CommandRouter::new(RecordingChannel::default());
        let err = router.submit(Some("PUMP:EVERYTHING")).await.unwrap_err();

        assert!(matches!(err, BridgeError::Command(CommandError::Invalid { .. })));
        assert!(router.channel.lines.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_report_missing_command() {
        let router = CommandRouter::new(RecordingChannel::default());
        let err = router.submit(None).await.unwrap_err();
        assert!(matches!(err, BridgeError::Command(CommandError::Missing)));
    }

    #[tokio::test]
    async fn should_propagate_channel_failure() {
        let router = CommandRouter::new(BrokenChannel);
        let err = router.submit(Some("FERTILIZER:ON")).await.unwrap_err();
        assert!(matches!(err, BridgeError::Actuator(_)));
    }
}
