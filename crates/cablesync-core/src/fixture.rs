//! Telemetry fixture loading.
//!
//! The fixture is a single JSON document with a payload `type` and one or
//! more reading arrays. It is decoded in one pass and indexed by sensor ID.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{ReadingIndex, TelemetryPayload};

/// Errors that can occur while loading a fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The file could not be read.
    #[error("Failed to read fixture {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid telemetry payload.
    #[error("Malformed fixture: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Decode a telemetry payload from raw JSON bytes.
pub fn decode_payload(bytes: &[u8]) -> Result<TelemetryPayload, FixtureError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Read a fixture file and index its readings.
pub async fn load_fixture(path: &Path) -> Result<ReadingIndex, FixtureError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| FixtureError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let payload = decode_payload(&bytes)?;
    let asset_type = payload.asset_type;
    let index = ReadingIndex::from_payload(payload);

    tracing::info!(
        path = %path.display(),
        %asset_type,
        pressure = index.pressure_len(),
        temperature = index.temperature_len(),
        "Loaded telemetry fixture"
    );

    Ok(index)
}
