//! Core domain types, port definitions and services for cablesync.
//!
//! This crate knows nothing about MongoDB, SQLite or InfluxDB. Storage and
//! time-series adapters implement the traits in [`ports`] and are wired
//! together by the CLI's composition root.
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod fixture;
pub mod generator;
pub mod join;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    AssetStatus, AssetType, Cable, FieldValue, Location, MetricType, ParseEnumError, Phase,
    Point, ReadingIndex, Section, Sensor, SensorReading, Substation, TelemetryPayload,
};
pub use fixture::{FixtureError, decode_payload, load_fixture};
pub use generator::{CableGenerator, GeneratorConfig};
pub use join::{SENSOR_MEASUREMENT, build_points};
pub use ports::{
    AssetRepository, Backends, CoreError, PointWriteError, PointWriter, RepositoryError,
};
pub use services::{AppCore, AssetService, ForwardService, ForwardSummary, SeedService, SeedSummary};
pub use settings::{
    DEFAULT_BATCH_SIZE, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_FIXTURE_PATH, Settings,
    SettingsError, StoreKind, validate_settings,
};
