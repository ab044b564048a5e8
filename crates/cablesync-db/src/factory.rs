//! Composition utilities for building the asset repository.
//!
//! This module picks and constructs the document store adapter from
//! settings. It is focused purely on construction and should not contain
//! any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

use cablesync_core::{AssetRepository, Settings, StoreKind};

use crate::repositories::{MongoAssetRepository, MongoTarget, SqliteAssetRepository};
use crate::setup::setup_database;

/// Factory for creating asset repositories.
///
/// This struct provides composition utilities only, no domain logic.
pub struct StoreFactory;

impl StoreFactory {
    /// Build the repository selected by `settings.store`.
    pub async fn asset_repository(settings: &Settings) -> anyhow::Result<Arc<dyn AssetRepository>> {
        let repo: Arc<dyn AssetRepository> = match settings.store {
            StoreKind::Mongo => Self::mongo_repository(&Self::mongo_target(settings)).await?,
            StoreKind::Sqlite => {
                let pool = setup_database(&settings.sqlite_path).await?;
                Self::sqlite_repository(pool)
            }
        };
        tracing::debug!(store = %settings.store, "Asset repository ready");
        Ok(repo)
    }

    /// Extract the MongoDB target from settings.
    pub fn mongo_target(settings: &Settings) -> MongoTarget {
        MongoTarget {
            uri: settings.mongo_uri.clone(),
            database: settings.mongo_database.clone(),
            collection: settings.mongo_collection.clone(),
            connect_timeout: Duration::from_secs(settings.connect_timeout_secs),
        }
    }

    /// Create a MongoDB repository.
    pub async fn mongo_repository(target: &MongoTarget) -> anyhow::Result<Arc<MongoAssetRepository>> {
        Ok(Arc::new(MongoAssetRepository::connect(target).await?))
    }

    /// Create a `SQLite` repository from a pool.
    pub fn sqlite_repository(pool: SqlitePool) -> Arc<SqliteAssetRepository> {
        Arc::new(SqliteAssetRepository::new(pool))
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema
/// already applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get the underlying pool.
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create an asset repository using this test database.
    pub fn asset_repository(&self) -> SqliteAssetRepository {
        SqliteAssetRepository::new(self.pool.clone())
    }
}
