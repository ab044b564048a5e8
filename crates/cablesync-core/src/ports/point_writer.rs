//! Point writer trait definition.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::PointWriteError;
use crate::domain::Point;

/// Sink for time-series points.
///
/// A call to `write_points` returns only once every point has been accepted
/// by the store (or the write failed). Adapters may split the slice into
/// several requests.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PointWriter: Send + Sync {
    /// Check that the store is reachable and healthy.
    async fn health(&self) -> Result<(), PointWriteError>;

    /// Write all points, blocking until they are accepted.
    async fn write_points(&self, points: &[Point]) -> Result<(), PointWriteError>;
}
