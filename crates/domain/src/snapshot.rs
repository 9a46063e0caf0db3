//! Sensor snapshot: one fully-populated report from the greenhouse controller.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// RFID sentinel reported when no tag is on the reader.
pub const NO_CARD: &str = "NoCard";

/// On/off state of a pump or fan as reported by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SwitchStatus {
    On,
    Off,
    /// Missing or unreadable in the report. Serialized as an empty string.
    #[default]
    #[serde(rename = "")]
    Unknown,
}

impl SwitchStatus {
    /// Parse a wire token (`ON` / `OFF`), ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("ON") {
            Some(Self::On)
        } else if value.eq_ignore_ascii_case("OFF") {
            Some(Self::Off)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Unknown => "",
        }
    }
}

impl std::fmt::Display for SwitchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Control mode of the water pump and ventilation fan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ControlMode {
    Auto,
    Manual,
    /// Missing or unreadable in the report. Serialized as an empty string.
    #[default]
    #[serde(rename = "")]
    Unknown,
}

impl ControlMode {
    /// Parse a wire token (`AUTO` / `MANUAL`), ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("AUTO") {
            Some(Self::Auto)
        } else if value.eq_ignore_ascii_case("MANUAL") {
            Some(Self::Manual)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Manual => "MANUAL",
            Self::Unknown => "",
        }
    }
}

impl std::fmt::Display for ControlMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed sensor report.
///
/// Always fully populated: a field missing from the report holds its
/// type-default instead of being left unset. Temperatures and humidities may
/// be NaN when the controller reports a sensor fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Outside temperature, °C (`T1`).
    pub outside_temp: f64,
    /// Outside relative humidity, % (`H1`).
    pub outside_humidity: f64,
    /// Greenhouse temperature, °C (`T2`).
    pub greenhouse_temp: f64,
    /// Greenhouse relative humidity, % (`H2`).
    pub greenhouse_humidity: f64,
    /// Soil moisture, % (`Soil`).
    pub soil_moisture: i32,
    /// Light level, % (`Light`).
    pub light_level: i32,
    /// Water tank fill level, % (`Tank`).
    pub water_tank_level: i32,
    /// Nutrient solution pH (`pH`).
    pub ph_level: f64,
    pub water_pump_status: SwitchStatus,
    pub water_pump_mode: ControlMode,
    pub ventilation_fan_status: SwitchStatus,
    pub ventilation_fan_mode: ControlMode,
    /// The fertilizer pump is manual-only, so it has no mode.
    pub fertilizer_pump_status: SwitchStatus,
    /// Last RFID tag seen, or [`NO_CARD`].
    pub rfid_tag: String,
    /// When the report line was parsed. Not carried on the wire.
    pub captured_at: Timestamp,
}

impl SensorSnapshot {
    /// Snapshot used before the first report arrives: readings at zero,
    /// actuators off and in automatic mode, no RFID tag.
    #[must_use]
    pub fn idle(captured_at: Timestamp) -> Self {
        Self {
            outside_temp: 0.0,
            outside_humidity: 0.0,
            greenhouse_temp: 0.0,
            greenhouse_humidity: 0.0,
            soil_moisture: 0,
            light_level: 0,
            water_tank_level: 0,
            ph_level: 0.0,
            water_pump_status: SwitchStatus::Off,
            water_pump_mode: ControlMode::Auto,
            ventilation_fan_status: SwitchStatus::Off,
            ventilation_fan_mode: ControlMode::Auto,
            fertilizer_pump_status: SwitchStatus::Off,
            rfid_tag: NO_CARD.to_string(),
            captured_at,
        }
    }

    /// Whether an RFID tag is currently on the reader.
    #[must_use]
    pub fn has_rfid_tag(&self) -> bool {
        !self.rfid_tag.is_empty() && self.rfid_tag != NO_CARD
    }
}
