//! Routing strategy implementations
//!
//! Each strategy is a synchronous, side-effect-free read over the
//! snapshot its collaborators hand back. All six share one signature so
//! the registry can dispatch uniformly; strategies that don't use the
//! caller id or the model hint simply ignore them.

use prismnet_core::{Model, Provider, StoreError, StrategyId};

pub mod auto;
pub mod custom_order;
pub mod latency;
pub mod preferred_model;
pub mod price;
pub mod throughput;

pub use auto::AutoStrategy;
pub use custom_order::CustomOrderStrategy;
pub use latency::LatencyStrategy;
pub use preferred_model::PreferredModelStrategy;
pub use price::PriceStrategy;
pub use throughput::ThroughputStrategy;

/// Trait for model-selection strategies
pub trait Strategy: Send + Sync {
    /// Pick one model among the available providers
    ///
    /// `Ok(None)` is the explicit no-match signal: no candidate
    /// satisfied this strategy's criteria under the current data. Only
    /// failed collaborator reads surface as errors.
    fn select(
        &self,
        providers: &[Provider],
        caller_id: &str,
        preferred_model: Option<&str>,
    ) -> Result<Option<Model>, StoreError>;

    /// Identifier this strategy is registered under
    fn id(&self) -> StrategyId;
}
