//! `SQLite` implementation of the `AssetRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use cablesync_core::{AssetRepository, AssetStatus, Cable, RepositoryError};

/// `SQLite` implementation of the `AssetRepository` trait.
///
/// Each cable is stored whole as a JSON document. `circuit_id` and `status`
/// are copied into their own columns so that ordering and status filtering
/// happen in SQL.
pub struct SqliteAssetRepository {
    pool: SqlitePool,
}

impl SqliteAssetRepository {
    /// Create a new `SQLite` asset repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn storage_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection(e.to_string())
        }
        other => RepositoryError::Storage(other.to_string()),
    }
}

fn encode(cable: &Cable) -> Result<String, RepositoryError> {
    serde_json::to_string(cable).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

fn decode(documents: Vec<String>) -> Result<Vec<Cable>, RepositoryError> {
    documents
        .iter()
        .map(|json| {
            serde_json::from_str(json).map_err(|e| RepositoryError::Serialization(e.to_string()))
        })
        .collect()
}

const INSERT_CABLE: &str =
    "INSERT INTO cables (circuit_id, status, document, inserted_at) VALUES (?, ?, ?, ?)";

#[async_trait]
impl AssetRepository for SqliteAssetRepository {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cables")
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    async fn insert(&self, cable: &Cable) -> Result<(), RepositoryError> {
        let document = encode(cable)?;
        let inserted_at = chrono::Utc::now().to_rfc3339();

        sqlx::query(INSERT_CABLE)
            .bind(i64::from(cable.circuit_id))
            .bind(cable.status.as_str())
            .bind(&document)
            .bind(&inserted_at)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(())
    }

    async fn insert_many(&self, cables: &[Cable]) -> Result<usize, RepositoryError> {
        let inserted_at = chrono::Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        for cable in cables {
            let document = encode(cable)?;
            sqlx::query(INSERT_CABLE)
                .bind(i64::from(cable.circuit_id))
                .bind(cable.status.as_str())
                .bind(&document)
                .bind(&inserted_at)
                .execute(&mut *tx)
                .await
                .map_err(storage_error)?;
        }

        tx.commit().await.map_err(storage_error)?;
        Ok(cables.len())
    }

    async fn list(&self) -> Result<Vec<Cable>, RepositoryError> {
        let documents: Vec<String> =
            sqlx::query_scalar("SELECT document FROM cables ORDER BY circuit_id, id")
                .fetch_all(&self.pool)
                .await
                .map_err(storage_error)?;
        decode(documents)
    }

    async fn list_by_status(&self, status: AssetStatus) -> Result<Vec<Cable>, RepositoryError> {
        let documents: Vec<String> = sqlx::query_scalar(
            "SELECT document FROM cables WHERE status = ? ORDER BY circuit_id, id",
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;
        decode(documents)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cables")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;
        u64::try_from(count).map_err(|e| RepositoryError::Storage(e.to_string()))
    }
}
