//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options. Every
//! connection setting can come from a flag or, failing that, from the
//! environment (including a `.env` file loaded before parsing).

use std::path::PathBuf;

use clap::Parser;

use cablesync_core::{Settings, SettingsError, StoreKind, validate_settings};

use crate::commands::Commands;

/// Command-line interface definition for the cable telemetry pipeline.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser, Debug)]
#[command(name = "cablesync")]
#[command(about = "Seed cable assets and forward joined sensor readings to InfluxDB")]
#[command(version)]
pub struct Cli {
    /// Document store backend: mongo or sqlite
    #[arg(long, env = "CABLESYNC_STORE", global = true, value_parser = parse_store)]
    pub store: Option<StoreKind>,

    /// MongoDB connection string
    #[arg(long, env = "MONGODB_URI", global = true, hide_env_values = true)]
    pub mongo_uri: Option<String>,

    /// MongoDB database holding the cable collection
    #[arg(long, global = true)]
    pub mongo_database: Option<String>,

    /// MongoDB collection holding cable documents
    #[arg(long, global = true)]
    pub mongo_collection: Option<String>,

    /// SQLite database file for the sqlite store
    #[arg(long, env = "CABLESYNC_SQLITE_PATH", global = true)]
    pub sqlite_path: Option<PathBuf>,

    /// InfluxDB base URL
    #[arg(long, env = "INFLUXDB_URL", global = true)]
    pub influx_url: Option<String>,

    /// InfluxDB organisation
    #[arg(long, env = "INFLUXDB_ORG", global = true)]
    pub influx_org: Option<String>,

    /// InfluxDB bucket
    #[arg(long, env = "INFLUXDB_BUCKET", global = true)]
    pub influx_bucket: Option<String>,

    /// InfluxDB API token
    #[arg(long, env = "INFLUXDB_TOKEN", global = true, hide_env_values = true)]
    pub influx_token: Option<String>,

    /// Points per InfluxDB write request
    #[arg(long, env = "INFLUXDB_BATCH_SIZE", global = true)]
    pub batch_size: Option<usize>,

    /// Connection timeout in seconds
    #[arg(long, global = true)]
    pub connect_timeout: Option<u64>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

fn parse_store(s: &str) -> Result<StoreKind, SettingsError> {
    s.parse()
}

impl Cli {
    /// Resolve validated settings: defaults overridden by whatever was
    /// given on the command line or in the environment.
    pub fn settings(&self) -> Result<Settings, SettingsError> {
        let mut settings = Settings::with_defaults();

        if let Some(store) = self.store {
            settings.store = store;
        }
        if let Some(uri) = &self.mongo_uri {
            settings.mongo_uri.clone_from(uri);
        }
        if let Some(database) = &self.mongo_database {
            settings.mongo_database.clone_from(database);
        }
        if let Some(collection) = &self.mongo_collection {
            settings.mongo_collection.clone_from(collection);
        }
        if let Some(path) = &self.sqlite_path {
            settings.sqlite_path.clone_from(path);
        }
        if let Some(url) = &self.influx_url {
            settings.influx_url.clone_from(url);
        }
        if let Some(org) = &self.influx_org {
            settings.influx_org.clone_from(org);
        }
        if let Some(bucket) = &self.influx_bucket {
            settings.influx_bucket.clone_from(bucket);
        }
        if let Some(token) = &self.influx_token {
            settings.influx_token = Some(token.clone());
        }
        if let Some(batch_size) = self.batch_size {
            settings.batch_size = batch_size;
        }
        if let Some(timeout) = self.connect_timeout {
            settings.connect_timeout_secs = timeout;
        }

        validate_settings(&settings)?;
        Ok(settings)
    }
}
