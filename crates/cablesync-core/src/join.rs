//! Join of stored cables with fixture readings.

use chrono::{DateTime, Utc};

use crate::domain::{Cable, Point, ReadingIndex};

/// Measurement name for every point produced by the join.
pub const SENSOR_MEASUREMENT: &str = "sensor_data";

/// Build one point per sensor on `cable` that has a matching reading.
///
/// Points are stamped with the reading's `measuredAt` when it parses as
/// RFC 3339, otherwise with `now`.
pub fn build_points(cable: &Cable, index: &ReadingIndex, now: DateTime<Utc>) -> Vec<Point> {
    cable
        .sensors()
        .filter_map(|(section, sensor)| {
            let reading = index.lookup(sensor)?;

            let mut point = Point::new(SENSOR_MEASUREMENT)
                .tag("cableID", cable.circuit_id.to_string())
                .tag("status", cable.status.as_str())
                .tag("section", section.section_number.to_string())
                .tag("metric", sensor.metric_type.as_str());
            if let Some(phase) = sensor.phase {
                point = point.tag("phase", phase.as_str());
            }
            if let Some(location) = sensor.location {
                point = point.tag("location", location.as_str());
            }

            Some(
                point
                    .field("value", reading.value)
                    .field("alertHigh", reading.alert_high)
                    .field("alertLow", reading.alert_low)
                    .field("criticalHigh", reading.critical_high)
                    .field("criticalLow", reading.critical_low)
                    .at(reading.measured_at_utc().unwrap_or(now)),
            )
        })
        .collect()
}
