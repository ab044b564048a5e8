//! Repository implementations for the cable document store.
//!
//! These implementations encapsulate every driver call. Neither the
//! `SqlitePool` nor the MongoDB `Client` leaks through the port trait
//! signatures.

mod mongo_asset_repository;
mod sqlite_asset_repository;

pub use mongo_asset_repository::{MongoAssetRepository, MongoTarget};
pub use sqlite_asset_repository::SqliteAssetRepository;
