//! Core services - the application's business logic layer.
//!
//! This module contains high-level service abstractions that orchestrate
//! between ports (trait interfaces) and domain logic. Services here are
//! pure orchestrators - they don't know about concrete implementations.

mod app_core;
mod asset_service;
mod forward_service;
mod seed_service;

pub use app_core::AppCore;
pub use asset_service::AssetService;
pub use forward_service::{ForwardService, ForwardSummary};
pub use seed_service::{SeedService, SeedSummary};
