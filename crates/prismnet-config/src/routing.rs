use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Default lookback window for metric freshness
const DEFAULT_LOOKBACK: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Caller id the custom-order strategy falls back to when a request
/// carries none
const DEFAULT_CALLER_ID: &str = "default";

/// Routing decision engine configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RoutingConfig {
    /// Maximum age of a metric sample still considered current
    /// (duration literal, e.g. `"15m"`, `"24h"`, `"365d"`)
    #[serde(deserialize_with = "parse_duration")]
    pub metrics_lookback: Duration,
    /// Caller id substituted when a request supplies a blank one
    pub default_caller_id: String,
    /// Weighted-score strategy tuning
    pub auto: AutoConfig,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            metrics_lookback: DEFAULT_LOOKBACK,
            default_caller_id: DEFAULT_CALLER_ID.to_owned(),
            auto: AutoConfig::default(),
        }
    }
}

/// Weights and normalization ceilings for the AUTO strategy
///
/// The defaults reproduce the gateway's historical constants; they are
/// configuration rather than code so deployments can retune them
/// without a rebuild. Weights must sum to 1.0.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AutoConfig {
    /// Weight of the price component
    pub price_weight: f64,
    /// Weight of the throughput component
    pub throughput_weight: f64,
    /// Weight of the latency component
    pub latency_weight: f64,
    /// Weight of the success-rate component
    pub success_rate_weight: f64,
    /// Combined per-token price (USD) at or above which the price
    /// component floors at 0
    pub price_ceiling: f64,
    /// Throughput (requests/minute) at or above which the throughput
    /// component caps at 1
    pub throughput_ceiling: f64,
    /// Latency (ms) at or above which the latency component floors at 0
    pub latency_ceiling_ms: f64,
}

impl Default for AutoConfig {
    fn default() -> Self {
        Self {
            price_weight: 0.30,
            throughput_weight: 0.25,
            latency_weight: 0.25,
            success_rate_weight: 0.20,
            price_ceiling: 0.01,
            throughput_ceiling: 1000.0,
            latency_ceiling_ms: 5000.0,
        }
    }
}

impl AutoConfig {
    /// Sum of the four component weights
    pub fn weight_sum(&self) -> f64 {
        self.price_weight + self.throughput_weight + self.latency_weight + self.success_rate_weight
    }
}

fn parse_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    duration_str::parse(&raw)
        .map_err(|e| serde::de::Error::custom(format!("invalid duration '{raw}': {e}")))
}
