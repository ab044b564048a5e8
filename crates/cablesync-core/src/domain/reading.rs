//! Sensor reading types decoded from the telemetry fixture.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::asset::{AssetType, MetricType, Sensor};

/// One reading from the telemetry fixture.
///
/// Thresholds default to `0.0` and strings to empty when the fixture omits
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    #[serde(rename = "sensorID")]
    pub sensor_id: u32,
    #[serde(default)]
    pub description: String,
    /// When the value was measured (RFC 3339 in well-formed fixtures).
    #[serde(default)]
    pub measured_at: String,
    #[serde(default)]
    pub sent_at: String,
    pub value: f64,
    #[serde(default)]
    pub alert_low: f64,
    #[serde(default)]
    pub critical_low: f64,
    #[serde(default)]
    pub oor_low: f64,
    #[serde(default)]
    pub alert_high: f64,
    #[serde(default)]
    pub critical_high: f64,
    #[serde(default)]
    pub oor_high: f64,
}

impl SensorReading {
    /// Parse `measured_at` as RFC 3339, if it is one.
    pub fn measured_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.measured_at.trim())
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}

/// The fixture envelope: a payload type plus per-metric reading arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryPayload {
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<Vec<SensorReading>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Vec<SensorReading>>,
}

/// Readings keyed by sensor ID, kept apart per metric.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingIndex {
    pressure: HashMap<u32, SensorReading>,
    temperature: HashMap<u32, SensorReading>,
}

impl ReadingIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a payload according to its asset type.
    ///
    /// `CABLE` payloads contribute pressure readings and `RTU` payloads
    /// contribute temperature readings. `GAUGE` payloads carry nothing the
    /// join can use and leave the index empty.
    pub fn from_payload(payload: TelemetryPayload) -> Self {
        let mut index = Self::new();
        match payload.asset_type {
            AssetType::Cable => {
                for reading in payload.pressure.unwrap_or_default() {
                    index.insert_pressure(reading);
                }
            }
            AssetType::Rtu => {
                for reading in payload.temperature.unwrap_or_default() {
                    index.insert_temperature(reading);
                }
            }
            AssetType::Gauge => {
                tracing::warn!("Gauge payloads carry no joinable readings; index left empty");
            }
        }
        index
    }

    /// Add a pressure reading, replacing any earlier one for the same sensor.
    pub fn insert_pressure(&mut self, reading: SensorReading) {
        self.pressure.insert(reading.sensor_id, reading);
    }

    /// Add a temperature reading, replacing any earlier one for the same sensor.
    pub fn insert_temperature(&mut self, reading: SensorReading) {
        self.temperature.insert(reading.sensor_id, reading);
    }

    /// Find the reading that belongs to a sensor, by its metric type.
    pub fn lookup(&self, sensor: &Sensor) -> Option<&SensorReading> {
        match sensor.metric_type {
            MetricType::CablePressure => self.pressure.get(&sensor.sensor_id),
            MetricType::RtuTemperature => self.temperature.get(&sensor.sensor_id),
            MetricType::RtuVoltage | MetricType::GaugeVoltage => None,
        }
    }

    pub fn pressure_len(&self) -> usize {
        self.pressure.len()
    }

    pub fn temperature_len(&self) -> usize {
        self.temperature.len()
    }

    pub fn len(&self) -> usize {
        self.pressure.len() + self.temperature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Location, Phase};

    fn reading(sensor_id: u32, value: f64) -> SensorReading {
        SensorReading {
            sensor_id,
            description: String::new(),
            measured_at: String::new(),
            sent_at: String::new(),
            value,
            alert_low: 0.0,
            critical_low: 0.0,
            oor_low: 0.0,
            alert_high: 0.0,
            critical_high: 0.0,
            oor_high: 0.0,
        }
    }

    #[test]
    fn test_reading_decodes_fixture_field_names() {
        let json = r#"{
            "sensorID": 12,
            "description": "Red phase source",
            "measuredAt": "2024-03-01T10:15:00Z",
            "sentAt": "2024-03-01T10:15:05Z",
            "value": 4.25,
            "alertLow": 1.5,
            "criticalLow": 1.0,
            "oorLow": 0.0,
            "alertHigh": 6.0,
            "criticalHigh": 7.5,
            "oorHigh": 10.0
        }"#;
        let r: SensorReading = serde_json::from_str(json).unwrap();
        assert_eq!(r.sensor_id, 12);
        assert!((r.value - 4.25).abs() < f64::EPSILON);
        assert!((r.critical_high - 7.5).abs() < f64::EPSILON);
        assert_eq!(r.measured_at_utc().unwrap().to_rfc3339(), "2024-03-01T10:15:00+00:00");
    }

    #[test]
    fn test_missing_thresholds_default_to_zero() {
        let r: SensorReading = serde_json::from_str(r#"{"sensorID": 1, "value": 2.0}"#).unwrap();
        assert!(r.alert_high.abs() < f64::EPSILON);
        assert!(r.description.is_empty());
        assert!(r.measured_at_utc().is_none());
    }

    #[test]
    fn test_cable_payload_indexes_pressure_only() {
        let payload = TelemetryPayload {
            asset_type: AssetType::Cable,
            pressure: Some(vec![reading(1, 1.0), reading(2, 2.0)]),
            temperature: Some(vec![reading(3, 30.0)]),
        };
        let index = ReadingIndex::from_payload(payload);
        assert_eq!(index.pressure_len(), 2);
        assert_eq!(index.temperature_len(), 0);
    }

    #[test]
    fn test_rtu_payload_indexes_temperature_only() {
        let payload = TelemetryPayload {
            asset_type: AssetType::Rtu,
            pressure: Some(vec![reading(1, 1.0)]),
            temperature: Some(vec![reading(3, 30.0)]),
        };
        let index = ReadingIndex::from_payload(payload);
        assert_eq!(index.pressure_len(), 0);
        assert_eq!(index.temperature_len(), 1);
    }

    #[test]
    fn test_gauge_payload_is_empty() {
        let payload = TelemetryPayload {
            asset_type: AssetType::Gauge,
            pressure: Some(vec![reading(1, 1.0)]),
            temperature: None,
        };
        assert!(ReadingIndex::from_payload(payload).is_empty());
    }

    #[test]
    fn test_duplicate_sensor_ids_keep_last() {
        let payload = TelemetryPayload {
            asset_type: AssetType::Cable,
            pressure: Some(vec![reading(5, 1.0), reading(5, 9.0)]),
            temperature: None,
        };
        let index = ReadingIndex::from_payload(payload);
        let sensor = Sensor::pressure(5, Phase::Red, Location::Source);
        assert_eq!(index.len(), 1);
        assert!((index.lookup(&sensor).unwrap().value - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lookup_respects_metric_type() {
        let mut index = ReadingIndex::new();
        index.insert_pressure(reading(4, 1.0));
        index.insert_temperature(reading(4, 40.0));

        let pressure = Sensor::pressure(4, Phase::Blue, Location::Target);
        let temperature = Sensor::unplaced(4, MetricType::RtuTemperature);
        let voltage = Sensor::unplaced(4, MetricType::RtuVoltage);

        assert!((index.lookup(&pressure).unwrap().value - 1.0).abs() < f64::EPSILON);
        assert!((index.lookup(&temperature).unwrap().value - 40.0).abs() < f64::EPSILON);
        assert!(index.lookup(&voltage).is_none());
    }
}
