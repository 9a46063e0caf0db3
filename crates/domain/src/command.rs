//! Actuator commands: the grammar accepted on the command channel.
//!
//! A command token has the form `TARGET:ACTION[:STATE]`:
//!
//! | Target | Accepted forms |
//! |--------|----------------|
//! | `WATER` | `WATER:AUTO`, `WATER:MANUAL:ON`, `WATER:MANUAL:OFF` |
//! | `FAN` | `FAN:AUTO`, `FAN:MANUAL:ON`, `FAN:MANUAL:OFF` |
//! | `FERTILIZER` | `FERTILIZER:ON`, `FERTILIZER:OFF` |
//!
//! Tokens are trimmed and matched case-insensitively. The canonical upper-case
//! form produced by [`Command`]'s `Display` is what goes out on the wire.

use std::str::FromStr;

use crate::snapshot::SwitchStatus;

/// Actuator subsystem a command is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Water,
    Fan,
    Fertilizer,
}

impl Target {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Water => "WATER",
            Self::Fan => "FAN",
            Self::Fertilizer => "FERTILIZER",
        }
    }

    /// Whether the target supports automatic control by the controller.
    #[must_use]
    pub fn has_auto_mode(self) -> bool {
        !matches!(self, Self::Fertilizer)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested on/off state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Power {
    On,
    Off,
}

impl Power {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("ON") {
            Some(Self::On)
        } else if token.eq_ignore_ascii_case("OFF") {
            Some(Self::Off)
        } else {
            None
        }
    }
}

impl From<Power> for SwitchStatus {
    fn from(power: Power) -> Self {
        match power {
            Power::On => Self::On,
            Power::Off => Self::Off,
        }
    }
}

/// What to do with the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Hand control back to the controller's automatic regulation.
    Auto,
    /// Take manual control and force the given state.
    Manual(Power),
    /// Switch a manual-only target on or off.
    Switch(Power),
}

/// A validated actuator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub target: Target,
    pub action: Action,
}

impl Command {
    #[must_use]
    pub fn new(target: Target, action: Action) -> Self {
        Self { target, action }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.action {
            Action::Auto => write!(f, "{}:AUTO", self.target),
            Action::Manual(power) => write!(f, "{}:MANUAL:{}", self.target, power.as_str()),
            Action::Switch(power) => write!(f, "{}:{}", self.target, power.as_str()),
        }
    }
}

/// Why a command token was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// No token, or only whitespace.
    #[error("missing command")]
    Missing,

    /// The token does not match the command grammar.
    #[error("invalid command {token:?}: {reason}")]
    Invalid { token: String, reason: &'static str },
}

impl CommandError {
    fn invalid(token: &str, reason: &'static str) -> Self {
        Self::Invalid {
            token: token.to_string(),
            reason,
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(CommandError::Missing);
        }

        let parts: Vec<&str> = token.split(':').map(str::trim).collect();
        let target = match parts[0].to_ascii_uppercase().as_str() {
            "WATER" => Target::Water,
            "FAN" => Target::Fan,
            "FERTILIZER" => Target::Fertilizer,
            _ => return Err(CommandError::invalid(token, "unknown target")),
        };

        let action = match (target.has_auto_mode(), &parts[1..]) {
            (_, []) => return Err(CommandError::invalid(token, "missing action")),
            (true, [action]) if action.eq_ignore_ascii_case("AUTO") => Action::Auto,
            (true, [action, state]) if action.eq_ignore_ascii_case("MANUAL") => {
                let power = Power::from_token(state)
                    .ok_or_else(|| CommandError::invalid(token, "state must be ON or OFF"))?;
                Action::Manual(power)
            }
            (true, [action]) if action.eq_ignore_ascii_case("MANUAL") => {
                return Err(CommandError::invalid(token, "MANUAL requires ON or OFF"));
            }
            (false, [state]) => {
                let power = Power::from_token(state).ok_or_else(|| {
                    CommandError::invalid(token, "fertilizer only accepts ON or OFF")
                })?;
                Action::Switch(power)
            }
            _ => return Err(CommandError::invalid(token, "unsupported action for target")),
        };

        Ok(Self { target, action })
    }
}
