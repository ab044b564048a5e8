//! `AppCore` - the primary application facade.
//!
//! Adapters (the CLI) receive an `AppCore` instance and use it to access
//! all functionality.

use crate::ports::{Backends, CoreError, PointWriter};
use std::sync::Arc;

use super::{AssetService, ForwardService, SeedService};

/// The core application facade.
///
/// `AppCore` is constructed at the adapter's composition root (bootstrap.rs)
/// with concrete document-store and time-series implementations.
///
/// # Example
///
/// ```ignore
/// let backends = Backends::new(asset_repo, point_writer);
/// let core = AppCore::new(backends);
///
/// let summary = core.seeding().seed(GeneratorConfig::default(), true).await?;
/// ```
pub struct AppCore {
    assets: AssetService,
    seeding: SeedService,
    forwarding: ForwardService,
    points: Arc<dyn PointWriter>,
}

impl AppCore {
    /// Create a new `AppCore` over the given backends.
    pub fn new(backends: Backends) -> Self {
        Self {
            assets: AssetService::new(backends.assets.clone()),
            seeding: SeedService::new(backends.assets.clone()),
            forwarding: ForwardService::new(backends.assets, backends.points.clone()),
            points: backends.points,
        }
    }

    /// Access the asset inspection service.
    pub const fn assets(&self) -> &AssetService {
        &self.assets
    }

    /// Access the seeding service.
    pub const fn seeding(&self) -> &SeedService {
        &self.seeding
    }

    /// Access the forwarding service.
    pub const fn forwarding(&self) -> &ForwardService {
        &self.forwarding
    }

    /// Check the time-series store is reachable.
    pub async fn points_health(&self) -> Result<(), CoreError> {
        self.points.health().await.map_err(CoreError::from)
    }
}
