//! Latency-based routing
//!
//! Ranks candidate models by their provider's most recent latency
//! sample inside the lookback window, ascending. Providers without a
//! fresh sample are excluded entirely.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use prismnet_core::{MetricKind, MetricsReader, Model, ModelCatalog, Provider, StoreError, StrategyId};

use crate::metrics::{latest_by_provider, lookback_start};
use crate::strategy::Strategy;

/// Select the model behind the freshest lowest-latency provider
pub struct LatencyStrategy {
    catalog: Arc<dyn ModelCatalog>,
    metrics: Arc<dyn MetricsReader>,
    lookback: Duration,
}

impl LatencyStrategy {
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

impl Strategy for LatencyStrategy {
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
                .recent_metrics(&provider_ids, Some(MetricKind::Latency), since)?;
        let freshest = latest_by_provider(&samples);

        tracing::debug!(
            providers = providers.len(),
            with_samples = freshest.len(),
            "latency samples gathered"
        );

        let mut candidates: Vec<(Model, f64)> = self
            .catalog
            .list_active_models(&provider_ids)?
            .into_iter()
            .filter_map(|m| freshest.get(&m.provider_id).map(|s| (m, s.value)))
            .collect();

        candidates.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        let selected = candidates.into_iter().next().map(|(m, latency)| {
            tracing::debug!(model = %m.model_id, latency_ms = latency, "lowest-latency model selected");
            m
        });

        if selected.is_none() {
            tracing::warn!("no available provider has a fresh latency sample");
        }

        Ok(selected)
    }

    fn id(&self) -> StrategyId {
        StrategyId::Latency
    }
}
