//! Asset service - read-only inspection of the document store.

use crate::domain::{AssetStatus, Cable};
use crate::ports::{AssetRepository, CoreError};
use std::sync::Arc;

/// Service for inspecting stored cables.
pub struct AssetService {
    repo: Arc<dyn AssetRepository>,
}

impl AssetService {
    /// Create a new asset service.
    pub fn new(repo: Arc<dyn AssetRepository>) -> Self {
        Self { repo }
    }

    /// Check the store is reachable.
    pub async fn ping(&self) -> Result<(), CoreError> {
        self.repo.ping().await.map_err(CoreError::from)
    }

    /// List cables, optionally restricted to one status.
    pub async fn list(&self, status: Option<AssetStatus>) -> Result<Vec<Cable>, CoreError> {
        let cables = match status {
            Some(status) => self.repo.list_by_status(status).await?,
            None => self.repo.list().await?,
        };
        Ok(cables)
    }

    /// Number of stored cables.
    pub async fn count(&self) -> Result<u64, CoreError> {
        self.repo.count().await.map_err(CoreError::from)
    }
}
