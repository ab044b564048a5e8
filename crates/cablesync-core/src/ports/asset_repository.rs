//! Asset repository trait definition.
//!
//! This port defines the interface for cable persistence in a document
//! store. Implementations handle all driver details internally.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::RepositoryError;
use crate::domain::{AssetStatus, Cable};

/// Repository for cable documents.
///
/// # Design Rules
///
/// - No driver types in signatures
/// - Collection-level operations only: the join reads whole cables
/// - Status filtering must match on the same serialisation used for storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;

    /// Remove every stored cable.
    async fn clear(&self) -> Result<(), RepositoryError>;

    /// Insert a single cable.
    async fn insert(&self, cable: &Cable) -> Result<(), RepositoryError>;

    /// Insert several cables, returning how many were written.
    ///
    /// The default inserts one at a time; adapters with a bulk API override it.
    async fn insert_many(&self, cables: &[Cable]) -> Result<usize, RepositoryError> {
        for cable in cables {
            self.insert(cable).await?;
        }
        Ok(cables.len())
    }

    /// List every stored cable, ordered by circuit ID.
    async fn list(&self) -> Result<Vec<Cable>, RepositoryError>;

    /// List cables with the given status, ordered by circuit ID.
    async fn list_by_status(&self, status: AssetStatus) -> Result<Vec<Cable>, RepositoryError>;

    /// Number of stored cables.
    async fn count(&self) -> Result<u64, RepositoryError>;
}
