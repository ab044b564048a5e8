//! Document store adapters for cablesync.
//!
//! Two implementations of [`cablesync_core::AssetRepository`] live here:
//! a MongoDB collection adapter for production and a SQLite JSON-document
//! adapter for local runs and tests.
#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::StoreFactory;

// Re-export TestDb for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

// Re-export repository implementations
pub use repositories::{MongoAssetRepository, MongoTarget, SqliteAssetRepository};

// Re-export setup functions for convenient access
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
