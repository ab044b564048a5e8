//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated here:
//! - Asset repository (MongoDB or SQLite, via cablesync-db)
//! - InfluxDB client (via cablesync-influx)
//! - Core services (via cablesync-core)
//!
//! Command handlers receive the fully-composed `AppCore` and delegate work to it.

use std::sync::Arc;

use anyhow::Result;
use cablesync_core::{AppCore, AssetRepository, Backends, PointWriter, Settings, SettingsError};
use cablesync_db::StoreFactory;
use cablesync_influx::{DefaultInfluxClient, InfluxConfig};

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Validated runtime settings.
    pub settings: Settings,
}

impl CliConfig {
    pub const fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

/// Fully composed application context for CLI commands.
///
/// This struct owns all the infrastructure and provides access to
/// the `AppCore` for command handlers.
pub struct CliContext {
    /// The core application facade.
    pub app: AppCore,
    /// InfluxDB client for read-back queries.
    pub influx: Arc<DefaultInfluxClient>,
    /// Settings the context was built from.
    pub settings: Settings,
}

impl CliContext {
    /// Access the `AppCore`.
    pub const fn app(&self) -> &AppCore {
        &self.app
    }

    /// Access the InfluxDB client.
    pub const fn influx(&self) -> &Arc<DefaultInfluxClient> {
        &self.influx
    }

    /// Access the resolved settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fail early when a command needs InfluxDB credentials that are not set.
    pub fn require_influx_token(&self) -> Result<(), SettingsError> {
        self.settings.require_influx_token().map(|_| ())
    }
}

/// Bootstrap the CLI application.
///
/// Connects to the configured document store and builds the InfluxDB
/// client, then wires both into `AppCore`.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let CliConfig { settings } = config;
    tracing::debug!(?settings, "Bootstrapping");

    let assets = StoreFactory::asset_repository(&settings).await?;
    let influx = Arc::new(DefaultInfluxClient::new(InfluxConfig::from_settings(
        &settings,
    ))?);

    Ok(bootstrap_with(settings, assets, influx.clone(), influx))
}

/// Compose a context from already-built adapters.
///
/// `points` is normally the same client as `influx`; tests substitute a
/// recording writer.
pub fn bootstrap_with(
    settings: Settings,
    assets: Arc<dyn AssetRepository>,
    points: Arc<dyn PointWriter>,
    influx: Arc<DefaultInfluxClient>,
) -> CliContext {
    let app = AppCore::new(Backends::new(assets, points));
    CliContext {
        app,
        influx,
        settings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cablesync_core::StoreKind;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_bootstrap_sqlite_store() {
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            store: StoreKind::Sqlite,
            sqlite_path: dir.path().join("nested").join("assets.db"),
            ..Settings::with_defaults()
        };

        let ctx = bootstrap(CliConfig::new(settings)).await.unwrap();
        ctx.app().assets().ping().await.unwrap();
        assert_eq!(ctx.app().assets().count().await.unwrap(), 0);
        assert_eq!(ctx.influx().config().bucket(), "sample-bucket");
        assert!(ctx.require_influx_token().is_err());
    }
}
