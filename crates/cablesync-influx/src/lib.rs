//! InfluxDB v2 client for cablesync.
//!
//! Implements [`cablesync_core::PointWriter`] over the HTTP write API and
//! provides a small Flux read-back for inspecting what was written.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod http;
mod line_protocol;
mod query;
mod writer;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultInfluxClient, InfluxClient};

// Configuration
pub use config::InfluxConfig;

// Errors
pub use error::{InfluxError, InfluxResult};

// Transport seam for custom backends
pub use http::{HttpBackend, HttpRequest, HttpResponse, Method, ReqwestBackend};

// Encoding and read-back
pub use line_protocol::{encode_point, encode_points};
pub use query::{FluxQuery, QueryRecord, check_range_start, parse_csv};
