//! Logging for the PrismNet gateway core
//!
//! Initializes the `tracing` subscriber from configuration. Exporters
//! beyond stdout are a deployment concern and live outside this crate.

use prismnet_config::TelemetryConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global `tracing` subscriber
///
/// Falls back to the default filter and text format when no
/// configuration is supplied. Call once at process start.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: Option<&TelemetryConfig>) -> anyhow::Result<()> {
    let defaults = TelemetryConfig::default();
    let config = config.unwrap_or(&defaults);

    let filter =
        EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        registry
            .with(fmt_layer.json())
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;
    } else {
        registry
            .with(fmt_layer)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;
    }

    Ok(())
}
