//! Shared domain model for the PrismNet gateway core
//!
//! Entities, read-model traits over the backing store, and the error
//! boundary between routing logic and the transport layer.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod entity;
pub mod error;
pub mod memory;
pub mod store;

pub use entity::{
    MetricKind, Model, ModelRecordId, Provider, ProviderId, ProviderMetric, RequestRecord,
    RequestStatus, RoutingRule, RuleId, StrategyId,
};
pub use error::HttpError;
pub use memory::MemoryStore;
pub use store::{MetricsReader, ModelCatalog, ProviderDirectory, RoutingRuleStore, StoreError};
