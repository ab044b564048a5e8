//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (document store, time-series store, filesystem).
//!
//! # Structure
//!
//! - `asset` - Cable asset records (`Cable`, `Section`, `Sensor`, ...)
//! - `reading` - Fixture readings and the sensor-ID index built from them
//! - `point` - Time-series points emitted by the join

mod asset;
mod point;
mod reading;

pub use asset::{
    AssetStatus, AssetType, Cable, Location, MetricType, ParseEnumError, Phase, Section, Sensor,
    Substation,
};
pub use point::{FieldValue, Point};
pub use reading::{ReadingIndex, SensorReading, TelemetryPayload};
