//! Throughput-based routing
//!
//! Mirror of the latency strategy with the ranking inverted: the
//! provider with the highest fresh throughput sample wins.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use prismnet_core::{MetricKind, MetricsReader, Model, ModelCatalog, Provider, StoreError, StrategyId};

use crate::metrics::{latest_by_provider, lookback_start};
use crate::strategy::Strategy;

/// Select the model behind the freshest highest-throughput provider
pub struct ThroughputStrategy {
    catalog: Arc<dyn ModelCatalog>,
    metrics: Arc<dyn MetricsReader>,
    lookback: Duration,
}

impl ThroughputStrategy {
    /// Create the strategy over a catalog and metrics reader
    pub fn new(
        catalog: Arc<dyn ModelCatalog>,
        metrics: Arc<dyn MetricsReader>,
        lookback: Duration,
    ) -> Self {
        Self {
            catalog,
            metrics,
            lookback,
        }
    }
}

impl Strategy for ThroughputStrategy {
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
        let since = lookback_start(self.lookback);
        let samples =
            self.metrics
                .recent_metrics(&provider_ids, Some(MetricKind::Throughput), since)?;
        let freshest = latest_by_provider(&samples);

        tracing::debug!(
            providers = providers.len(),
            with_samples = freshest.len(),
            "throughput samples gathered"
        );

        let mut candidates: Vec<(Model, f64)> = self
            .catalog
            .list_active_models(&provider_ids)?
            .into_iter()
            .filter_map(|m| freshest.get(&m.provider_id).map(|s| (m, s.value)))
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let selected = candidates.into_iter().next().map(|(m, throughput)| {
            tracing::debug!(
                model = %m.model_id,
                throughput,
                "highest-throughput model selected"
            );
            m
        });

        if selected.is_none() {
            tracing::warn!("no available provider has a fresh throughput sample");
        }

        Ok(selected)
    }

    fn id(&self) -> StrategyId {
        StrategyId::Throughput
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{metric, model, provider, store_with_metrics};

    const LOOKBACK: Duration = Duration::from_secs(60 * 60);

    #[test]
    fn highest_throughput_provider_wins() {
        let store = store_with_metrics(
            vec![
                model(1, 1, "gpt-4", 0.001, 0.002),
                model(2, 2, "claude", 0.002, 0.003),
            ],
            vec![
                metric(1, MetricKind::Throughput, 200.0, 5),
                metric(2, MetricKind::Throughput, 800.0, 5),
            ],
        );
        let strategy = ThroughputStrategy::new(store.clone(), store, LOOKBACK);
        let providers = vec![provider(1, "OpenAI"), provider(2, "Anthropic")];

        let selected = strategy.select(&providers, "user1", None).unwrap().unwrap();
        assert_eq!(selected.model_id, "claude");
    }

    #[test]
    fn samples_outside_the_window_are_dropped() {
        let store = store_with_metrics(
            vec![
                model(1, 1, "gpt-4", 0.001, 0.002),
                model(2, 2, "claude", 0.002, 0.003),
            ],
            vec![
                metric(1, MetricKind::Throughput, 200.0, 5),
                metric(2, MetricKind::Throughput, 9000.0, 120),
            ],
        );
        let strategy = ThroughputStrategy::new(store.clone(), store, LOOKBACK);
        let providers = vec![provider(1, "OpenAI"), provider(2, "Anthropic")];

        let selected = strategy.select(&providers, "user1", None).unwrap().unwrap();
        assert_eq!(selected.model_id, "gpt-4");
    }

    #[test]
    fn no_fresh_samples_is_no_match() {
        let store = store_with_metrics(vec![model(1, 1, "gpt-4", 0.001, 0.002)], vec![]);
        let strategy = ThroughputStrategy::new(store.clone(), store, LOOKBACK);
        let providers = vec![provider(1, "OpenAI")];

        assert!(strategy.select(&providers, "user1", None).unwrap().is_none());
    }
}
