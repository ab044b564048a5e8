//! Command-line adapter for cablesync.
//!
//! Parses flags and environment, composes the adapters in [`bootstrap`] and
//! dispatches to the command [`handlers`].
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary entry point only
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap, bootstrap_with};
pub use commands::{Commands, ForwardArgs, QueryArgs, SeedArgs};
pub use error::CliError;
pub use parser::Cli;
