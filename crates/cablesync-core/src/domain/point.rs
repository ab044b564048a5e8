//! Time-series point types.
//!
//! A `Point` is backend-neutral: tags and fields are kept in ordered maps so
//! that any encoding of a point is stable across runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single field value on a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Float(f64),
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

/// A measurement at an instant, with indexed tags and value fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub measurement: String,
    pub tags: BTreeMap<String, String>,
    pub fields: BTreeMap<String, FieldValue>,
    pub timestamp: DateTime<Utc>,
}

impl Point {
    /// Start a point for `measurement`, stamped with the current time.
    pub fn new(measurement: impl Into<String>) -> Self {
        Self {
            measurement: measurement.into(),
            tags: BTreeMap::new(),
            fields: BTreeMap::new(),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub const fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Float value of a field, if present and numeric.
    pub fn float_field(&self, key: &str) -> Option<f64> {
        match self.fields.get(key)? {
            FieldValue::Float(v) => Some(*v),
            #[allow(clippy::cast_precision_loss)]
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Boolean(_) | FieldValue::String(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_builder_collects_tags_and_fields() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let point = Point::new("sensor_data")
            .tag("cableID", "7")
            .tag("phase", "RED")
            .field("value", 4.5)
            .field("count", 3_i64)
            .field("ok", true)
            .at(ts);

        assert_eq!(point.measurement, "sensor_data");
        assert_eq!(point.tags.len(), 2);
        assert_eq!(point.timestamp, ts);
        assert_eq!(point.float_field("value"), Some(4.5));
        assert_eq!(point.float_field("count"), Some(3.0));
        assert_eq!(point.float_field("ok"), None);
        assert_eq!(point.float_field("missing"), None);
    }

    #[test]
    fn test_tag_keys_are_ordered() {
        let point = Point::new("m").tag("z", "1").tag("a", "2").tag("m", "3");
        let keys: Vec<&str> = point.tags.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "m", "z"]);
    }
}
