//! Sensor report line parser.
//!
//! The controller sends one report per line as comma-separated `Key:Value`
//! pairs in any order:
//!
//! ```text
//! T1:25.0,H1:60.0,T2:28.0,H2:70.0,Soil:45,Light:80,Tank:75,pH:6.8,WaterPump:ON,WaterMode:AUTO,Fan:OFF,FanMode:AUTO,Fertilizer:OFF,RFID:NoCard
//! ```
//!
//! Parsing never fails. The line is tokenized once into a key → raw value
//! table (first occurrence wins), then every known key is converted to its
//! typed field. A missing key yields the field's type-default; a value that
//! does not convert yields zero / unknown and is reported as a
//! [`MalformedField`] diagnostic.

use crate::snapshot::{ControlMode, NO_CARD, SensorSnapshot, SwitchStatus};
use crate::time::Timestamp;

const KEY_COUNT: usize = 14;

/// The keys understood in a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKey {
    OutsideTemp,
    OutsideHumidity,
    GreenhouseTemp,
    GreenhouseHumidity,
    SoilMoisture,
    LightLevel,
    WaterTank,
    Ph,
    WaterPump,
    WaterMode,
    Fan,
    FanMode,
    Fertilizer,
    Rfid,
}

impl ReportKey {
    /// Every key, in the order the controller emits them.
    pub const ALL: [Self; KEY_COUNT] = [
        Self::OutsideTemp,
        Self::OutsideHumidity,
        Self::GreenhouseTemp,
        Self::GreenhouseHumidity,
        Self::SoilMoisture,
        Self::LightLevel,
        Self::WaterTank,
        Self::Ph,
        Self::WaterPump,
        Self::WaterMode,
        Self::Fan,
        Self::FanMode,
        Self::Fertilizer,
        Self::Rfid,
    ];

    /// Key as written on the wire (case-sensitive).
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::OutsideTemp => "T1",
            Self::OutsideHumidity => "H1",
            Self::GreenhouseTemp => "T2",
            Self::GreenhouseHumidity => "H2",
            Self::SoilMoisture => "Soil",
            Self::LightLevel => "Light",
            Self::WaterTank => "Tank",
            Self::Ph => "pH",
            Self::WaterPump => "WaterPump",
            Self::WaterMode => "WaterMode",
            Self::Fan => "Fan",
            Self::FanMode => "FanMode",
            Self::Fertilizer => "Fertilizer",
            Self::Rfid => "RFID",
        }
    }

    fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.wire_name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for ReportKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A report value that could not be converted and was replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed value {value:?} for {key}, expected {expected}")]
pub struct MalformedField {
    pub key: ReportKey,
    pub value: String,
    pub expected: &'static str,
}

/// Outcome of parsing one report line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReport {
    /// The fully-populated snapshot.
    pub snapshot: SensorSnapshot,
    /// Values that were present but unusable, in key order.
    pub malformed: Vec<MalformedField>,
}

/// Raw values of one line, indexed by [`ReportKey`].
struct RawFields<'a>([Option<&'a str>; KEY_COUNT]);

impl<'a> RawFields<'a> {
    fn tokenize(line: &'a str) -> Self {
        let mut fields = [None; KEY_COUNT];
        for segment in line.split(',') {
            let Some((name, value)) = segment.split_once(':') else {
                continue;
            };
            let Some(key) = ReportKey::from_wire(name.trim()) else {
                continue;
            };
            let slot = &mut fields[key.index()];
            if slot.is_none() {
                *slot = Some(value.trim());
            }
        }
        Self(fields)
    }

    fn get(&self, key: ReportKey) -> Option<&'a str> {
        self.0[key.index()]
    }
}

/// Accumulates typed fields and diagnostics while converting raw values.
struct Converter<'a> {
    raw: RawFields<'a>,
    malformed: Vec<MalformedField>,
}

impl Converter<'_> {
    fn flag(&mut self, key: ReportKey, value: &str, expected: &'static str) {
        self.malformed.push(MalformedField {
            key,
            value: value.to_string(),
            expected,
        });
    }

    fn float(&mut self, key: ReportKey) -> f64 {
        let Some(value) = self.raw.get(key) else {
            return 0.0;
        };
        value.parse().unwrap_or_else(|_| {
            self.flag(key, value, "a number");
            0.0
        })
    }

    #[allow(clippy::cast_possible_truncation)]
    fn integer(&mut self, key: ReportKey) -> i32 {
        let Some(value) = self.raw.get(key) else {
            return 0;
        };
        if let Ok(parsed) = value.parse::<i32>() {
            return parsed;
        }
        // The controller occasionally prints integer percentages with a decimal part.
        match value.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => parsed.trunc() as i32,
            _ => {
                self.flag(key, value, "an integer");
                0
            }
        }
    }

    fn switch(&mut self, key: ReportKey) -> SwitchStatus {
        let Some(value) = self.raw.get(key) else {
            return SwitchStatus::Unknown;
        };
        SwitchStatus::from_wire(value).unwrap_or_else(|| {
            self.flag(key, value, "ON or OFF");
            SwitchStatus::Unknown
        })
    }

    fn mode(&mut self, key: ReportKey) -> ControlMode {
        let Some(value) = self.raw.get(key) else {
            return ControlMode::Unknown;
        };
        ControlMode::from_wire(value).unwrap_or_else(|| {
            self.flag(key, value, "AUTO or MANUAL");
            ControlMode::Unknown
        })
    }

    fn text(&self, key: ReportKey, default: &str) -> String {
        self.raw.get(key).unwrap_or(default).to_string()
    }
}

/// Parse one report line into a snapshot stamped with `captured_at`.
#[must_use]
pub fn parse(line: &str, captured_at: Timestamp) -> ParsedReport {
    let mut conv = Converter {
        raw: RawFields::tokenize(line),
        malformed: Vec::new(),
    };

    let snapshot = SensorSnapshot {
        outside_temp: conv.float(ReportKey::OutsideTemp),
        outside_humidity: conv.float(ReportKey::OutsideHumidity),
        greenhouse_temp: conv.float(ReportKey::GreenhouseTemp),
        greenhouse_humidity: conv.float(ReportKey::GreenhouseHumidity),
        soil_moisture: conv.integer(ReportKey::SoilMoisture),
        light_level: conv.integer(ReportKey::LightLevel),
        water_tank_level: conv.integer(ReportKey::WaterTank),
        ph_level: conv.float(ReportKey::Ph),
        water_pump_status: conv.switch(ReportKey::WaterPump),
        water_pump_mode: conv.mode(ReportKey::WaterMode),
        ventilation_fan_status: conv.switch(ReportKey::Fan),
        ventilation_fan_mode: conv.mode(ReportKey::FanMode),
        fertilizer_pump_status: conv.switch(ReportKey::Fertilizer),
        rfid_tag: conv.text(ReportKey::Rfid, NO_CARD),
        captured_at,
    };

    ParsedReport {
        snapshot,
        malformed: conv.malformed,
    }
}

impl SensorSnapshot {
    /// Render the snapshot in the controller's report line format.
    #[must_use]
    pub fn to_report_line(&self) -> String {
        format!(
            "T1:{},H1:{},T2:{},H2:{},Soil:{},Light:{},Tank:{},pH:{},WaterPump:{},WaterMode:{},Fan:{},FanMode:{},Fertilizer:{},RFID:{}",
            self.outside_temp,
            self.outside_humidity,
            self.greenhouse_temp,
            self.greenhouse_humidity,
            self.soil_moisture,
            self.light_level,
            self.water_tank_level,
            self.ph_level,
            self.water_pump_status,
            self.water_pump_mode,
            self.ventilation_fan_status,
            self.ventilation_fan_mode,
            self.fertilizer_pump_status,
            self.rfid_tag,
        )
    }
}
