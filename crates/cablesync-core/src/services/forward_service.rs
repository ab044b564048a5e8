//! Forward service - joins stored cables with readings and writes points.

use chrono::Utc;
use std::sync::Arc;

use crate::domain::{AssetStatus, ReadingIndex};
use crate::join::build_points;
use crate::ports::{AssetRepository, CoreError, PointWriter};

/// Outcome of a forwarding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardSummary {
    /// Cables returned by the status query.
    pub cables_scanned: usize,
    /// Sensors inspected across those cables.
    pub sensors_scanned: usize,
    /// Points accepted by the time-series store.
    pub points_written: usize,
}

/// Service for forwarding joined readings to the time-series store.
pub struct ForwardService {
    assets: Arc<dyn AssetRepository>,
    points: Arc<dyn PointWriter>,
}

impl ForwardService {
    /// Create a new forward service.
    pub fn new(assets: Arc<dyn AssetRepository>, points: Arc<dyn PointWriter>) -> Self {
        Self { assets, points }
    }

    /// Join every cable with `status` against `index` and write the result.
    ///
    /// Each cable's points go out in one write call; cables with no matching
    /// sensor produce no call at all.
    pub async fn forward(
        &self,
        index: &ReadingIndex,
        status: AssetStatus,
    ) -> Result<ForwardSummary, CoreError> {
        let cables = self.assets.list_by_status(status).await?;
        tracing::info!(count = cables.len(), %status, "Queried cables");

        let mut summary = ForwardSummary {
            cables_scanned: cables.len(),
            ..ForwardSummary::default()
        };

        for cable in &cables {
            summary.sensors_scanned += cable.sensor_count();

            let points = build_points(cable, index, Utc::now());
            if points.is_empty() {
                continue;
            }

            self.points.write_points(&points).await?;
            tracing::debug!(
                circuit_id = cable.circuit_id,
                points = points.len(),
                "Forwarded cable readings"
            );
            summary.points_written += points.len();
        }

        tracing::info!(
            cables = summary.cables_scanned,
            points = summary.points_written,
            "Forwarding complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Cable, Location, MetricType, Phase, Point, Section, Sensor, SensorReading, Substation,
    };
    use crate::ports::{MockAssetRepository, MockPointWriter, PointWriteError};

    fn cable(circuit_id: u32, first_sensor: u32) -> Cable {
        Cable {
            circuit_id,
            circuit_name: format!("Cable{circuit_id}"),
            circuit_voltage: "66kV".to_string(),
            status: AssetStatus::Active,
            source_substation: Substation {
                adwh_id: 1,
                name: "Src".to_string(),
            },
            target_substation: Substation {
                adwh_id: 2,
                name: "Tgt".to_string(),
            },
            circuit_type: "OIL-FILLED".to_string(),
            feeder_number: 0,
            no_of_sections: 1,
            sections: vec![Section {
                section_number: 1,
                sensors: vec![
                    Sensor::pressure(first_sensor, Phase::Red, Location::Source),
                    Sensor::pressure(first_sensor + 1, Phase::Blue, Location::Target),
                    Sensor::unplaced(first_sensor + 2, MetricType::GaugeVoltage),
                ],
            }],
        }
    }

    fn reading(sensor_id: u32) -> SensorReading {
        SensorReading {
            sensor_id,
            description: "test".to_string(),
            measured_at: String::new(),
            sent_at: String::new(),
            value: 5.0,
            alert_low: 1.0,
            critical_low: 0.0,
            oor_low: 0.0,
            alert_high: 9.0,
            critical_high: 0.0,
            oor_high: 0.0,
        }
    }

    #[tokio::test]
    async fn test_forward_writes_per_cable() {
        let mut assets = MockAssetRepository::new();
        assets
            .expect_list_by_status()
            .withf(|status| *status == AssetStatus::Active)
            .times(1)
            .returning(|_| Ok(vec![cable(1, 1), cable(2, 10), cable(3, 20)]));

        let mut points = MockPointWriter::new();
        // Cable 1 matches two sensors, cable 3 matches one, cable 2 none
        points
            .expect_write_points()
            .withf(|pts: &[Point]| pts.iter().all(|p| p.tags["cableID"] == "1") && pts.len() == 2)
            .times(1)
            .returning(|_| Ok(()));
        points
            .expect_write_points()
            .withf(|pts: &[Point]| pts.len() == 1 && pts[0].tags["cableID"] == "3")
            .times(1)
            .returning(|_| Ok(()));

        let mut index = ReadingIndex::new();
        index.insert_pressure(reading(1));
        index.insert_pressure(reading(2));
        index.insert_pressure(reading(21));

        let service = ForwardService::new(Arc::new(assets), Arc::new(points));
        let summary = service.forward(&index, AssetStatus::Active).await.unwrap();

        assert_eq!(
            summary,
            ForwardSummary {
                cables_scanned: 3,
                sensors_scanned: 9,
                points_written: 3,
            }
        );
    }

    #[tokio::test]
    async fn test_forward_with_empty_index_writes_nothing() {
        let mut assets = MockAssetRepository::new();
        assets
            .expect_list_by_status()
            .returning(|_| Ok(vec![cable(1, 1)]));
        let mut points = MockPointWriter::new();
        points.expect_write_points().never();

        let service = ForwardService::new(Arc::new(assets), Arc::new(points));
        let summary = service
            .forward(&ReadingIndex::new(), AssetStatus::Active)
            .await
            .unwrap();
        assert_eq!(summary.points_written, 0);
        assert_eq!(summary.cables_scanned, 1);
    }

    #[tokio::test]
    async fn test_forward_aborts_on_write_failure() {
        let mut assets = MockAssetRepository::new();
        assets
            .expect_list_by_status()
            .returning(|_| Ok(vec![cable(1, 1), cable(2, 10)]));
        let mut points = MockPointWriter::new();
        points.expect_write_points().times(1).returning(|_| {
            Err(PointWriteError::Rejected {
                status: 401,
                message: "unauthorized".to_string(),
            })
        });

        let mut index = ReadingIndex::new();
        index.insert_pressure(reading(1));
        index.insert_pressure(reading(10));

        let service = ForwardService::new(Arc::new(assets), Arc::new(points));
        let err = service
            .forward(&index, AssetStatus::Active)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::PointWrite(PointWriteError::Rejected { status: 401, .. })
        ));
    }
}
