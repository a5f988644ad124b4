//! Read contracts over the backing store
//!
//! The routing core never mutates these collections; each trait exposes
//! the snapshot reads a strategy evaluation needs. Implementations are
//! supplied by the persistence collaborator ([`crate::MemoryStore`] backs
//! tests and embedded use).

use jiff::Timestamp;
use thiserror::Error;

use crate::entity::{MetricKind, Model, Provider, ProviderId, ProviderMetric, RoutingRule};

/// A read from the backing store failed
///
/// Distinct from "no rows matched", which every read expresses through
/// its return value.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend unreachable or the read timed out
    #[error("routing data store unavailable: {0}")]
    Unavailable(String),

    /// A row exists but could not be decoded into its entity
    #[error("corrupt {entity} row: {detail}")]
    Corrupt {
        /// Entity the row belongs to
        entity: &'static str,
        /// Decoder failure detail
        detail: String,
    },
}

/// Active-provider lookups
pub trait ProviderDirectory: Send + Sync {
    /// All providers currently eligible for routing
    fn list_active_providers(&self) -> Result<Vec<Provider>, StoreError>;
}

/// Active-model lookups
pub trait ModelCatalog: Send + Sync {
    /// Active models belonging to any of the given providers, in
    /// catalog order
    fn list_active_models(&self, provider_ids: &[ProviderId]) -> Result<Vec<Model>, StoreError>;

    /// The active model with this provider-scoped name under one
    /// provider, if any
    fn find_active_model(
        &self,
        model_id: &str,
        provider_id: ProviderId,
    ) -> Result<Option<Model>, StoreError>;
}

/// Performance-sample lookups
pub trait MetricsReader: Send + Sync {
    /// Samples taken at or after `since` for the given providers,
    /// optionally restricted to one kind
    fn recent_metrics(
        &self,
        provider_ids: &[ProviderId],
        kind: Option<MetricKind>,
        since: Timestamp,
    ) -> Result<Vec<ProviderMetric>, StoreError>;
}

/// Custom-order rule lookups
pub trait RoutingRuleStore: Send + Sync {
    /// Active rules owned by this caller, ascending by rule id
    fn active_rules_for(&self, caller_id: &str) -> Result<Vec<RoutingRule>, StoreError>;
}
