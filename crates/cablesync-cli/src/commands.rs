//! Main commands enum and primary subcommands.
//!
//! This module defines the available commands for the CLI tool.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use cablesync_core::{AssetStatus, GeneratorConfig, Phase};
use cablesync_influx::{InfluxError, check_range_start};

/// Available commands for the cable telemetry pipeline.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the document store and InfluxDB are reachable
    Check,

    /// Generate demo cables and write them to the document store
    Seed(SeedArgs),

    /// Join stored cables with fixture readings and write points to InfluxDB
    Forward(ForwardArgs),

    /// Seed the store, then forward readings (the full pipeline)
    Run {
        #[command(flatten)]
        seeding: SeedArgs,
        #[command(flatten)]
        forwarding: ForwardArgs,
    },

    /// List cables held in the document store
    List {
        /// Only show cables with this status (ACTIVE or INACTIVE)
        #[arg(short, long)]
        status: Option<AssetStatus>,
        /// Print cable documents as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read recently written points back from InfluxDB
    Query(QueryArgs),
}

/// Options for cable generation.
#[derive(Args, Debug, Clone)]
pub struct SeedArgs {
    /// Number of cable circuits to generate
    #[arg(long, default_value_t = 65)]
    pub circuits: u32,

    /// Sections per circuit
    #[arg(long, default_value_t = 8)]
    pub sections: u32,

    /// RNG seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Append to the existing cables instead of replacing them
    #[arg(long)]
    pub keep_existing: bool,

    /// ID given to the first generated sensor
    #[arg(long, default_value_t = 1)]
    pub first_sensor_id: u32,
}

impl SeedArgs {
    /// Generator parameters for these options.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            circuits: self.circuits,
            sections_per_circuit: self.sections,
            first_sensor_id: self.first_sensor_id,
            seed: self.seed,
            ..GeneratorConfig::default()
        }
    }
}

/// Options for forwarding readings.
#[derive(Args, Debug, Clone)]
pub struct ForwardArgs {
    /// Telemetry fixture file (defaults to testdata/cop_format.json)
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    /// Forward cables with this status
    #[arg(long, default_value_t = AssetStatus::Active)]
    pub status: AssetStatus,
}

/// Options for reading points back.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Range start: a Flux duration such as -1h or an RFC3339 timestamp
    #[arg(long, default_value = "-1h", allow_hyphen_values = true, value_parser = parse_range)]
    pub range: String,

    /// Only points for this cable
    #[arg(long)]
    pub cable_id: Option<u32>,

    /// Only points for this phase
    #[arg(long)]
    pub phase: Option<Phase>,

    /// Only points for this section
    #[arg(long)]
    pub section: Option<u32>,

    /// Field to read
    #[arg(long, default_value = "value")]
    pub field: String,

    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_range(s: &str) -> Result<String, InfluxError> {
    check_range_start(s)
}
