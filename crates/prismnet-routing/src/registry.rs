//! Registry of available routing strategies
//!
//! Built once at process start from the collaborator handles and never
//! mutated afterward; resolution is a plain map lookup keyed by
//! [`StrategyId`].

use std::collections::HashMap;
use std::sync::Arc;

use prismnet_config::RoutingConfig;
use prismnet_core::{MetricsReader, ModelCatalog, RoutingRuleStore, StrategyId};

use crate::error::RoutingError;
use crate::strategy::{
    AutoStrategy, CustomOrderStrategy, LatencyStrategy, PreferredModelStrategy, PriceStrategy,
    Strategy, ThroughputStrategy,
};

/// Maps strategy identifiers to their implementations
pub struct StrategyRegistry {
    strategies: HashMap<StrategyId, Arc<dyn Strategy>>,
}

impl StrategyRegistry {
    /// Build the registry with all six built-in strategies
    pub fn new(
        catalog: Arc<dyn ModelCatalog>,
        metrics: Arc<dyn MetricsReader>,
        rules: Arc<dyn RoutingRuleStore>,
        config: &RoutingConfig,
    ) -> Self {
        let lookback = config.metrics_lookback;
        let builtins: [Arc<dyn Strategy>; 6] = [
            Arc::new(PriceStrategy::new(catalog.clone())),
            Arc::new(LatencyStrategy::new(
                catalog.clone(),
                metrics.clone(),
                lookback,
            )),
            Arc::new(ThroughputStrategy::new(
                catalog.clone(),
                metrics.clone(),
                lookback,
            )),
            Arc::new(AutoStrategy::new(
                catalog.clone(),
                metrics,
                lookback,
                config.auto.clone(),
            )),
            Arc::new(CustomOrderStrategy::new(
                catalog.clone(),
                rules,
                config.default_caller_id.clone(),
            )),
            Arc::new(PreferredModelStrategy::new(catalog)),
        ];

        let mut strategies = HashMap::new();
        for strategy in builtins {
            strategies.insert(strategy.id(), strategy);
        }

        Self { strategies }
    }

    /// Replace or add a strategy under its own identifier
    ///
    /// Intended for embedders wiring custom implementations before the
    /// registry is handed to the router.
    pub fn register(&mut self, strategy: Arc<dyn Strategy>) {
        self.strategies.insert(strategy.id(), strategy);
    }

    /// Look up a strategy implementation
    ///
    /// A miss is a configuration error, distinct from a strategy
    /// finding no model.
    pub fn resolve(&self, id: StrategyId) -> Result<&dyn Strategy, RoutingError> {
        self.strategies
            .get(&id)
            .map(AsRef::as_ref)
            .ok_or_else(|| RoutingError::UnknownStrategy(id.to_string()))
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.strategies.keys().collect::<Vec<_>>())
            .finish()
    }
}
