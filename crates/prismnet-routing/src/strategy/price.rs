//! Price-based routing
//!
//! Ranks active models of the available providers by combined
//! input + output price per token, ascending, and takes the first.

use std::cmp::Ordering;
use std::sync::Arc;

use prismnet_core::{Model, ModelCatalog, Provider, StoreError, StrategyId};

use crate::strategy::Strategy;

/// Select the cheapest active model among the available providers
pub struct PriceStrategy {
    catalog: Arc<dyn ModelCatalog>,
}

impl PriceStrategy {
    /// Create the strategy over a model catalog
    pub fn new(catalog: Arc<dyn ModelCatalog>) -> Self {
        Self { catalog }
    }
}

impl Strategy for PriceStrategy {
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
        let mut models = self.catalog.list_active_models(&provider_ids)?;

        // Stable sort keeps catalog order for equal totals
        models.sort_by(|a, b| {
            a.total_pricing()
                .partial_cmp(&b.total_pricing())
                .unwrap_or(Ordering::Equal)
        });

        let selected = models.into_iter().next();
        match &selected {
            Some(model) => tracing::debug!(
                model = %model.model_id,
                total_pricing = model.total_pricing(),
                "cheapest model selected"
            ),
            None => tracing::warn!("no active models among available providers"),
        }

        Ok(selected)
    }

    fn id(&self) -> StrategyId {
        StrategyId::Price
    }
}
