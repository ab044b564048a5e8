//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `mongodb`, `sqlx` or `reqwest` types in any signature
//! - Repository traits are minimal and collection-focused
//! - The point writer accepts whole slices; batching is the adapter's concern

pub mod asset_repository;
pub mod point_writer;

use std::sync::Arc;
use thiserror::Error;

pub use asset_repository::AssetRepository;
pub use point_writer::PointWriter;

#[cfg(test)]
pub use asset_repository::MockAssetRepository;
#[cfg(test)]
pub use point_writer::MockPointWriter;

/// Container for the two external systems the core talks to.
///
/// Lives in core so that `AppCore` can accept it without depending on any
/// adapter crate.
#[derive(Clone)]
pub struct Backends {
    /// Document store holding cable records.
    pub assets: Arc<dyn AssetRepository>,
    /// Time-series store receiving joined points.
    pub points: Arc<dyn PointWriter>,
}

impl Backends {
    /// Create a new Backends container.
    pub fn new(assets: Arc<dyn AssetRepository>, points: Arc<dyn PointWriter>) -> Self {
        Self { assets, points }
    }
}

/// Domain-specific errors for document store operations.
///
/// This error type abstracts away storage implementation details (driver
/// errors) and gives services a clean failure surface.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store could not be reached or refused the connection.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Storage backend error (query, insert, drop).
    #[error("Storage error: {0}")]
    Storage(String),

    /// A document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Domain-specific errors for time-series writes.
#[derive(Debug, Error)]
pub enum PointWriteError {
    /// The time-series store could not be reached.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The store answered with a non-success status.
    #[error("Write rejected with status {status}: {message}")]
    Rejected {
        /// HTTP-style status code
        status: u16,
        /// Body or reason returned by the store
        message: String,
    },

    /// A point could not be encoded for the wire.
    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Document store operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Time-series write failed.
    #[error(transparent)]
    PointWrite(#[from] PointWriteError),

    /// Fixture could not be loaded.
    #[error(transparent)]
    Fixture(#[from] crate::fixture::FixtureError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}
