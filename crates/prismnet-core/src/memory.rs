//! In-memory implementation of the store read contracts
//!
//! Backs unit and integration tests, and embedders that manage routing
//! data themselves. Rows are held exactly as supplied; reads apply the
//! same active/ordering guarantees the persistence collaborator promises.

use jiff::Timestamp;

use crate::entity::{MetricKind, Model, Provider, ProviderId, ProviderMetric, RoutingRule};
use crate::store::{MetricsReader, ModelCatalog, ProviderDirectory, RoutingRuleStore, StoreError};

/// Vec-backed snapshot of providers, models, metrics, and rules
#[derive(Debug, Default)]
pub struct MemoryStore {
    providers: Vec<Provider>,
    models: Vec<Model>,
    metrics: Vec<ProviderMetric>,
    rules: Vec<RoutingRule>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider row, preserving insertion order
    #[must_use]
    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.providers.push(provider);
        self
    }

    /// Add a model row, preserving catalog order
    #[must_use]
    pub fn with_model(mut self, model: Model) -> Self {
        self.models.push(model);
        self
    }

    /// Add a metric sample
    #[must_use]
    pub fn with_metric(mut self, metric: ProviderMetric) -> Self {
        self.metrics.push(metric);
        self
    }

    /// Add a routing rule row
    #[must_use]
    pub fn with_rule(mut self, rule: RoutingRule) -> Self {
        self.rules.push(rule);
        self
    }
}

impl ProviderDirectory for MemoryStore {
    fn list_active_providers(&self) -> Result<Vec<Provider>, StoreError> {
        Ok(self.providers.iter().filter(|p| p.active).cloned().collect())
    }
}

impl ModelCatalog for MemoryStore {
    fn list_active_models(&self, provider_ids: &[ProviderId]) -> Result<Vec<Model>, StoreError> {
        Ok(self
            .models
            .iter()
            .filter(|m| m.active && provider_ids.contains(&m.provider_id))
            .cloned()
            .collect())
    }

    fn find_active_model(
        &self,
        model_id: &str,
        provider_id: ProviderId,
    ) -> Result<Option<Model>, StoreError> {
        Ok(self
            .models
            .iter()
            .find(|m| m.active && m.provider_id == provider_id && m.model_id == model_id)
            .cloned())
    }
}

impl MetricsReader for MemoryStore {
    fn recent_metrics(
        &self,
        provider_ids: &[ProviderId],
        kind: Option<MetricKind>,
        since: Timestamp,
    ) -> Result<Vec<ProviderMetric>, StoreError> {
        Ok(self
            .metrics
            .iter()
            .filter(|m| {
                provider_ids.contains(&m.provider_id)
                    && kind.is_none_or(|k| m.kind == k)
                    && m.timestamp >= since
            })
            .cloned()
            .collect())
    }
}

impl RoutingRuleStore for MemoryStore {
    fn active_rules_for(&self, caller_id: &str) -> Result<Vec<RoutingRule>, StoreError> {
        let mut rules: Vec<RoutingRule> = self
            .rules
            .iter()
            .filter(|r| r.active && r.caller_id == caller_id)
            .cloned()
            .collect();
        rules.sort_by_key(|r| r.id);
        Ok(rules)
    }
}
