//! Domain entities read by the routing core
//!
//! All of these rows are owned and mutated by collaborators (admin APIs,
//! metric ingestion); the routing core only ever reads consistent
//! snapshots of them.

use std::fmt;

use jiff::Timestamp;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

/// Persistence identifier of a [`Provider`] row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProviderId(pub u64);

/// Persistence identifier of a [`Model`] row
///
/// Distinct from [`Model::model_id`], which is the provider-scoped
/// model name (e.g. `gpt-4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModelRecordId(pub u64);

/// Persistence identifier of a [`RoutingRule`] row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuleId(pub u64);

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for ModelRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An upstream AI API vendor
///
/// `name` is globally unique. Only active providers participate in
/// routing; the available-provider set handed to strategies is always
/// pre-filtered to active rows.
#[derive(Debug, Clone)]
pub struct Provider {
    /// Row identifier
    pub id: ProviderId,
    /// Globally unique display name (e.g. `OpenAI`)
    pub name: String,
    /// Base endpoint requests are sent to
    pub base_url: Url,
    /// Credential for the provider API
    pub api_key: SecretString,
    /// Whether this provider is eligible for routing
    pub active: bool,
}

/// A specific inference model offered by exactly one provider
///
/// `(provider_id, model_id)` is unique among active models; `model_id`
/// alone is not globally unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Row identifier
    pub id: ModelRecordId,
    /// Owning provider
    pub provider_id: ProviderId,
    /// Provider-scoped model name (e.g. `gpt-4`)
    pub model_id: String,
    /// Human-readable display name
    pub display_name: String,
    /// Context window in tokens
    pub context_window: u32,
    /// Price per input token (USD)
    pub input_pricing: f64,
    /// Price per output token (USD)
    pub output_pricing: f64,
    /// Whether this model is eligible for routing
    pub active: bool,
}

impl Model {
    /// Combined input + output price per token, the unit price-based
    /// strategies rank by
    pub fn total_pricing(&self) -> f64 {
        self.input_pricing + self.output_pricing
    }
}

/// Kind of performance sample recorded for a provider
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricKind {
    /// Request latency in milliseconds
    Latency,
    /// Requests per minute
    Throughput,
    /// Fraction of requests that failed, 0.0 to 1.0
    ErrorRate,
    /// Fraction of requests that succeeded, 0.0 to 1.0
    SuccessRate,
}

/// A single performance sample for a provider
///
/// Samples accumulate over time; the "current" value for scoring is the
/// most recent sample within the lookback window, per (provider, kind).
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderMetric {
    /// Provider this sample was observed for
    pub provider_id: ProviderId,
    /// What was measured
    pub kind: MetricKind,
    /// Observed value, in the unit implied by `kind`
    pub value: f64,
    /// When the sample was taken
    pub timestamp: Timestamp,
}

/// A caller-owned provider-priority list used for deterministic
/// fallback selection
#[derive(Debug, Clone)]
pub struct RoutingRule {
    /// Row identifier; rules are evaluated in ascending id order
    pub id: RuleId,
    /// Caller this rule belongs to
    pub caller_id: String,
    /// Rule display name
    pub name: String,
    /// Whether this rule participates in selection
    pub active: bool,
    /// JSON-encoded array of provider names; index 0 is the highest
    /// priority
    pub provider_order: String,
}

impl RoutingRule {
    /// Decode the serialized provider-name list
    ///
    /// Consumers skip rules whose encoding fails to decode rather than
    /// failing the request.
    pub fn parsed_order(&self) -> Result<Vec<String>, serde_json::Error> {
        serde_json::from_str(&self.provider_order)
    }
}

/// Named routing algorithm identifiers recognized by the registry
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyId {
    /// Cheapest combined per-token price wins
    Price,
    /// Freshest lowest-latency provider wins
    Latency,
    /// Freshest highest-throughput provider wins
    Throughput,
    /// Weighted composite of price and performance metrics
    Auto,
    /// Caller-defined provider priority lists
    CustomOrder,
    /// Explicit model hint, `provider/model` or bare `model`
    PreferredModel,
}

/// Lifecycle state of a persisted request row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Routed, not yet dispatched upstream
    Pending,
    /// Dispatched to the selected provider
    Processing,
    /// Upstream call finished successfully
    Completed,
    /// Upstream call failed
    Failed,
}

/// Persistable record of a routed request
///
/// Produced by the orchestrator once a model has been chosen; writing it
/// to the store is a collaborator's responsibility.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    /// Caller that issued the request
    pub caller_id: String,
    /// Strategy that made the selection
    pub strategy: StrategyId,
    /// Prompt text the request carried
    pub prompt: String,
    /// Requested completion budget, if any
    pub max_tokens: Option<u32>,
    /// Selected provider row
    pub provider_id: ProviderId,
    /// Selected provider name, denormalized for reporting
    pub provider_name: String,
    /// Selected model row
    pub model_record_id: ModelRecordId,
    /// Selected provider-scoped model name
    pub model_id: String,
    /// Lifecycle state, always [`RequestStatus::Pending`] at creation
    pub status: RequestStatus,
    /// Creation time
    pub created_at: Timestamp,
}
