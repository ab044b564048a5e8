//! Seed service - generates cables and writes them to the document store.

use std::sync::Arc;

use crate::domain::AssetStatus;
use crate::generator::{CableGenerator, GeneratorConfig};
use crate::ports::{AssetRepository, CoreError};

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Cables written to the store.
    pub inserted: usize,
    /// Of those, how many are active.
    pub active: usize,
    /// Of those, how many are inactive.
    pub inactive: usize,
    /// Sensors across all written cables.
    pub sensors: usize,
}

/// Service for seeding the document store with generated cables.
pub struct SeedService {
    repo: Arc<dyn AssetRepository>,
}

impl SeedService {
    /// Create a new seed service.
    pub fn new(repo: Arc<dyn AssetRepository>) -> Self {
        Self { repo }
    }

    /// Generate cables from `config` and insert them.
    ///
    /// With `replace_existing`, the store is cleared first so that sensor IDs
    /// from an earlier run cannot collide with the new ones.
    pub async fn seed(
        &self,
        config: GeneratorConfig,
        replace_existing: bool,
    ) -> Result<SeedSummary, CoreError> {
        let mut generator = CableGenerator::new(config)?;

        if replace_existing {
            self.repo.clear().await?;
            tracing::debug!("Cleared existing cables");
        }

        let cables = generator.generate()?;
        for cable in &cables {
            tracing::debug!(
                circuit_id = cable.circuit_id,
                status = %cable.status,
                sensors = cable.sensor_count(),
                "Generated cable"
            );
        }
        let inserted = self.repo.insert_many(&cables).await?;

        let active = cables
            .iter()
            .filter(|c| c.status == AssetStatus::Active)
            .count();
        let summary = SeedSummary {
            inserted,
            active,
            inactive: cables.len() - active,
            sensors: cables.iter().map(|c| c.sensor_count()).sum(),
        };

        tracing::info!(
            inserted = summary.inserted,
            active = summary.active,
            sensors = summary.sensors,
            "Seeded cables"
        );
        Ok(summary)
    }
}
