//! Weighted-score routing
//!
//! Scores every candidate as a weighted composite of price and the
//! freshest throughput, latency, and success-rate samples, then takes
//! the maximum. Each component is normalized into [0, 1] against a
//! configured ceiling; an absent metric contributes 0 to its term
//! without renormalizing the weights, so a model with no metrics at
//! all is still eligible on price alone.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use prismnet_config::AutoConfig;
use prismnet_core::{
    MetricKind, MetricsReader, Model, ModelCatalog, Provider, ProviderMetric, StoreError,
    StrategyId,
};

use crate::metrics::{latest_by_provider_and_kind, lookback_start};
use crate::strategy::Strategy;

/// Select the model with the best composite score
pub struct AutoStrategy {
    catalog: Arc<dyn ModelCatalog>,
    metrics: Arc<dyn MetricsReader>,
    lookback: Duration,
    config: AutoConfig,
}

impl AutoStrategy {
    /// Create the strategy over a catalog, metrics reader, and tuning
    pub fn new(
        catalog: Arc<dyn ModelCatalog>,
        metrics: Arc<dyn MetricsReader>,
        lookback: Duration,
        config: AutoConfig,
    ) -> Self {
        Self {
            catalog,
            metrics,
            lookback,
            config,
        }
    }

    /// Composite score for one model, in [0, 1]
    fn score(&self, model: &Model, metrics: Option<&HashMap<MetricKind, &ProviderMetric>>) -> f64 {
        let c = &self.config;

        let price_score = clamp01(1.0 - model.total_pricing() / c.price_ceiling);
        let mut score = c.price_weight * price_score;

        if let Some(metrics) = metrics {
            let throughput_score = metrics
                .get(&MetricKind::Throughput)
                .map_or(0.0, |m| clamp01(m.value / c.throughput_ceiling));
            let latency_score = metrics
                .get(&MetricKind::Latency)
                .map_or(0.0, |m| clamp01(1.0 - m.value / c.latency_ceiling_ms));
            let success_score = metrics
                .get(&MetricKind::SuccessRate)
                .map_or(0.0, |m| clamp01(m.value));

            score += c.throughput_weight * throughput_score
                + c.latency_weight * latency_score
                + c.success_rate_weight * success_score;

            tracing::debug!(
                model = %model.model_id,
                price_score,
                throughput_score,
                latency_score,
                success_score,
                total = score,
                "composite score"
            );
        } else {
            tracing::debug!(
                model = %model.model_id,
                price_score,
                total = score,
                "no metrics, price component only"
            );
        }

        score
    }
}

impl Strategy for AutoStrategy {
    fn select(
        &self,
        providers: &[Provider],
        _caller_id: &str,
        _preferred_model: Option<&str>,
    ) -> Result<Option<Model>, StoreError> {
        if providers.is_empty() {
            return Ok(None);
        }

        let provider_ids: Vec<_> = providers.iter().map(|p| p.id).collect();
        let models = self.catalog.list_active_models(&provider_ids)?;
        if models.is_empty() {
            tracing::warn!("no active models among available providers");
            return Ok(None);
        }

        let since = lookback_start(self.lookback);
        let samples = self.metrics.recent_metrics(&provider_ids, None, since)?;
        let by_provider = latest_by_provider_and_kind(&samples);

        // First-encountered keeps the win on score ties
        let mut best: Option<(Model, f64)> = None;
        for model in models {
            let score = self.score(&model, by_provider.get(&model.provider_id));
            if best.as_ref().is_none_or(|(_, top)| score > *top) {
                best = Some((model, score));
            }
        }

        Ok(best.map(|(model, score)| {
            tracing::debug!(model = %model.model_id, score, "best composite score selected");
            model
        }))
    }

    fn id(&self) -> StrategyId {
        StrategyId::Auto
    }
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
