//! Cable asset domain types.
//!
//! A cable (circuit) runs between two substations and is split into
//! numbered sections, each carrying a fixed set of sensors. These records
//! are what the seeding command writes to the document store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    /// Name of the enum being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
    /// Comma-separated list of accepted names.
    pub expected: String,
}

/// Declares the wire name, `Display` and case-insensitive `FromStr` for a
/// unit-only enum whose serde representation is SCREAMING_SNAKE_CASE.
macro_rules! wire_names {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// All variants, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The name used on the wire and in storage.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| ParseEnumError {
                        kind: $kind,
                        value: s.to_string(),
                        expected: Self::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

/// Operational status of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetStatus {
    Active,
    Inactive,
}

wire_names!(AssetStatus, "asset status", { Active => "ACTIVE", Inactive => "INACTIVE" });

/// Electrical phase a pressure sensor is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Red,
    Yellow,
    Blue,
}

wire_names!(Phase, "phase", { Red => "RED", Yellow => "YELLOW", Blue => "BLUE" });

/// End of a section a pressure sensor sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Location {
    Source,
    Target,
}

wire_names!(Location, "location", { Source => "SOURCE", Target => "TARGET" });

/// What a sensor measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricType {
    CablePressure,
    RtuTemperature,
    RtuVoltage,
    GaugeVoltage,
}

wire_names!(MetricType, "metric type", {
    CablePressure => "CABLE_PRESSURE",
    RtuTemperature => "RTU_TEMPERATURE",
    RtuVoltage => "RTU_VOLTAGE",
    GaugeVoltage => "GAUGE_VOLTAGE",
});

/// Kind of asset a telemetry payload was sent by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Cable,
    Rtu,
    Gauge,
}

wire_names!(AssetType, "asset type", { Cable => "CABLE", Rtu => "RTU", Gauge => "GAUGE" });

/// A substation at one end of a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Substation {
    /// Identifier in the asset data warehouse.
    pub adwh_id: u32,
    /// Short substation code.
    pub name: String,
}

/// A measurement point on a cable section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    /// Sensor ID, the join key against fixture readings.
    pub sensor_id: u32,
    /// Phase, present on pressure sensors only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    /// Location, present on pressure sensors only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// What the sensor measures.
    pub metric_type: MetricType,
}

impl Sensor {
    /// A pressure sensor at the given phase and location.
    pub const fn pressure(sensor_id: u32, phase: Phase, location: Location) -> Self {
        Self {
            sensor_id,
            phase: Some(phase),
            location: Some(location),
            metric_type: MetricType::CablePressure,
        }
    }

    /// A sensor with no phase or location (RTU and gauge readings).
    pub const fn unplaced(sensor_id: u32, metric_type: MetricType) -> Self {
        Self {
            sensor_id,
            phase: None,
            location: None,
            metric_type,
        }
    }
}

/// A numbered section of a cable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// 1-based section number along the circuit.
    pub section_number: u32,
    /// Sensors fitted to this section.
    #[serde(default)]
    pub sensors: Vec<Sensor>,
}

/// A cable circuit record as stored in the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cable {
    pub circuit_id: u32,
    pub circuit_name: String,
    /// Nominal voltage label (e.g. "132kV").
    pub circuit_voltage: String,
    pub status: AssetStatus,
    pub source_substation: Substation,
    pub target_substation: Substation,
    /// Construction type (e.g. "OIL-FILLED").
    pub circuit_type: String,
    pub feeder_number: u32,
    pub no_of_sections: u32,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Cable {
    /// Iterate over every sensor on the cable together with its section.
    pub fn sensors(&self) -> impl Iterator<Item = (&Section, &Sensor)> {
        self.sections
            .iter()
            .flat_map(|section| section.sensors.iter().map(move |sensor| (section, sensor)))
    }

    /// Total number of sensors across all sections.
    pub fn sensor_count(&self) -> usize {
        self.sections.iter().map(|s| s.sensors.len()).sum()
    }
}
