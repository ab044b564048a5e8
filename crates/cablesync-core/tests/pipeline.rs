//! Integration tests for the seed -> fixture -> forward pipeline.
//!
//! Runs the core services end to end over in-memory backends and the
//! repository's sample fixture.

use async_trait::async_trait;
use cablesync_core::{
    AppCore, AssetRepository, AssetStatus, Backends, Cable, GeneratorConfig, Point,
    PointWriteError, PointWriter, RepositoryError, load_fixture,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MemoryRepo {
    cables: Mutex<Vec<Cable>>,
}

#[async_trait]
impl AssetRepository for MemoryRepo {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        self.cables.lock().unwrap().clear();
        Ok(())
    }

    async fn insert(&self, cable: &Cable) -> Result<(), RepositoryError> {
        self.cables.lock().unwrap().push(cable.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Cable>, RepositoryError> {
        Ok(self.cables.lock().unwrap().clone())
    }

    async fn list_by_status(&self, status: AssetStatus) -> Result<Vec<Cable>, RepositoryError> {
        Ok(self
            .cables
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.status == status)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.cables.lock().unwrap().len() as u64)
    }
}

#[derive(Default)]
struct RecordingWriter {
    batches: Mutex<Vec<Vec<Point>>>,
}

#[async_trait]
impl PointWriter for RecordingWriter {
    async fn health(&self) -> Result<(), PointWriteError> {
        Ok(())
    }

    async fn write_points(&self, points: &[Point]) -> Result<(), PointWriteError> {
        self.batches.lock().unwrap().push(points.to_vec());
        Ok(())
    }
}

fn sample_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../testdata/cop_format.json")
}

#[tokio::test]
async fn test_sample_fixture_loads() {
    let index = load_fixture(&sample_fixture()).await.unwrap();
    assert_eq!(index.pressure_len(), 17);
    assert_eq!(index.temperature_len(), 0);
}

/// Seed `circuits` cables, then pin cable 1 (the only one the sample
/// fixture covers) to `first_status`.
async fn seeded_core(
    circuits: u32,
    sections: u32,
    seed: u64,
    first_status: AssetStatus,
) -> (AppCore, Arc<MemoryRepo>, Arc<RecordingWriter>) {
    let repo = Arc::new(MemoryRepo::default());
    let writer = Arc::new(RecordingWriter::default());
    let core = AppCore::new(Backends::new(repo.clone(), writer.clone()));

    let config = GeneratorConfig {
        circuits,
        sections_per_circuit: sections,
        seed: Some(seed),
        ..GeneratorConfig::default()
    };
    let seeded = core.seeding().seed(config, true).await.unwrap();
    assert_eq!(seeded.inserted, circuits as usize);

    repo.cables.lock().unwrap()[0].status = first_status;
    (core, repo, writer)
}

async fn count_with_status(repo: &MemoryRepo, status: AssetStatus) -> usize {
    repo.list_by_status(status).await.unwrap().len()
}

#[tokio::test]
async fn test_seed_then_forward_only_active_cables() {
    let (core, repo, writer) = seeded_core(20, 8, 2024, AssetStatus::Active).await;

    let index = load_fixture(&sample_fixture()).await.unwrap();
    let summary = core
        .forwarding()
        .forward(&index, AssetStatus::Active)
        .await
        .unwrap();
    assert_eq!(
        summary.cables_scanned,
        count_with_status(&repo, AssetStatus::Active).await
    );

    // The fixture only covers sensors on the first cable: 15 pressure sensors
    // across its first three sections. Sensor 7 is an RTU sensor and 9999 is
    // not fitted anywhere.
    assert_eq!(summary.points_written, 15);
    let batches = writer.batches.lock().unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 15);
    assert!(batches[0].iter().all(|p| p.tags["cableID"] == "1"));
    assert!(batches[0].iter().all(|p| p.tags["status"] == "ACTIVE"));
}

#[tokio::test]
async fn test_forward_inactive_cables() {
    let (core, repo, writer) = seeded_core(10, 3, 11, AssetStatus::Inactive).await;

    let index = load_fixture(&sample_fixture()).await.unwrap();
    let summary = core
        .forwarding()
        .forward(&index, AssetStatus::Inactive)
        .await
        .unwrap();

    assert_eq!(
        summary.cables_scanned,
        count_with_status(&repo, AssetStatus::Inactive).await
    );
    assert_eq!(summary.points_written, 15);

    let batches = writer.batches.lock().unwrap();
    assert_eq!(batches.len(), 1);
    assert!(batches[0].iter().all(|p| p.tags["cableID"] == "1"));
    assert!(batches[0].iter().all(|p| p.tags["status"] == "INACTIVE"));
}

#[tokio::test]
async fn test_forward_skips_cable_of_other_status() {
    let (core, _repo, writer) = seeded_core(5, 3, 3, AssetStatus::Inactive).await;

    let index = load_fixture(&sample_fixture()).await.unwrap();
    let summary = core
        .forwarding()
        .forward(&index, AssetStatus::Active)
        .await
        .unwrap();

    assert_eq!(summary.points_written, 0);
    assert!(writer.batches.lock().unwrap().is_empty());
}
