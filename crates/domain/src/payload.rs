//! Telemetry payload served on the read API and pushed to the remote collector.

use serde::{Deserialize, Serialize};

use crate::snapshot::{ControlMode, SensorSnapshot, SwitchStatus};
use crate::time::Timestamp;

/// JSON document describing one snapshot of one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryPayload {
    pub device_id: String,
    pub timestamp: Timestamp,
    pub sensors: Sensors,
    pub actuators: Actuators,
    pub rfid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensors {
    pub outside_temp: f64,
    pub greenhouse_temp: f64,
    pub outside_humidity: f64,
    pub greenhouse_humidity: f64,
    pub soil_moisture: i32,
    pub light_level: i32,
    pub water_tank: i32,
    pub ph_level: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actuators {
    pub water_pump: ModedActuator,
    pub ventilation_fan: ModedActuator,
    pub fertilizer_pump: ManualActuator,
}

/// An actuator with both a switch state and a control mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModedActuator {
    pub status: SwitchStatus,
    pub mode: ControlMode,
}

/// A manual-only actuator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualActuator {
    pub status: SwitchStatus,
}

impl TelemetryPayload {
    /// Package `snapshot` for the device identified by `device_id`.
    #[must_use]
    pub fn from_snapshot(device_id: impl Into<String>, snapshot: &SensorSnapshot) -> Self {
        Self {
            device_id: device_id.into(),
            timestamp: snapshot.captured_at,
            sensors: Sensors {
                outside_temp: snapshot.outside_temp,
                greenhouse_temp: snapshot.greenhouse_temp,
                outside_humidity: snapshot.outside_humidity,
                greenhouse_humidity: snapshot.greenhouse_humidity,
                soil_moisture: snapshot.soil_moisture,
                light_level: snapshot.light_level,
                water_tank: snapshot.water_tank_level,
                ph_level: snapshot.ph_level,
            },
            actuators: Actuators {
                water_pump: ModedActuator {
                    status: snapshot.water_pump_status,
                    mode: snapshot.water_pump_mode,
                },
                ventilation_fan: ModedActuator {
                    status: snapshot.ventilation_fan_status,
                    mode: snapshot.ventilation_fan_mode,
                },
                fertilizer_pump: ManualActuator {
                    status: snapshot.fertilizer_pump_status,
                },
            },
            rfid: snapshot.rfid_tag.clone(),
        }
    }
}
