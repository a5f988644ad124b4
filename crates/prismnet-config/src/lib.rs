#![allow(clippy::must_use_candidate)]

//! Configuration for the PrismNet gateway core

mod env;
mod loader;
pub mod routing;
pub mod telemetry;

use serde::Deserialize;

pub use routing::{AutoConfig, RoutingConfig};
pub use telemetry::TelemetryConfig;

/// Top-level PrismNet configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Routing decision engine configuration
    pub routing: RoutingConfig,
    /// Logging configuration
    pub telemetry: Option<TelemetryConfig>,
}
