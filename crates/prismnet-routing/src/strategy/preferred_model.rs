//! Preferred-model routing
//!
//! Resolves an explicit model hint. `provider/model` pins both sides;
//! a bare `model` takes the first active match across the available
//! providers in the order they were supplied. A blank hint is a
//! no-match — the caller should not have reached this strategy
//! without one.

use std::sync::Arc;

use prismnet_core::{Model, ModelCatalog, Provider, StoreError, StrategyId};

use crate::strategy::Strategy;

/// Select the model named by the caller's hint
pub struct PreferredModelStrategy {
    catalog: Arc<dyn ModelCatalog>,
}

impl PreferredModelStrategy {
    /// Create the strategy over a model catalog
    pub fn new(catalog: Arc<dyn ModelCatalog>) -> Self {
        Self { catalog }
    }
}

impl Strategy for PreferredModelStrategy {
    fn select(
        &self,
        providers: &[Provider],
        _caller_id: &str,
        preferred_model: Option<&str>,
    ) -> Result<Option<Model>, StoreError> {
        if providers.is_empty() {
            return Ok(None);
        }

        let Some(hint) = preferred_model.map(str::trim).filter(|h| !h.is_empty()) else {
            tracing::warn!("preferred-model strategy invoked without a hint");
            return Ok(None);
        };

        let segments: Vec<&str> = hint.split('/').collect();
        match segments.as_slice() {
            [provider_name, model_id] => {
                let Some(provider) = providers.iter().find(|p| p.name == *provider_name) else {
                    tracing::warn!(
                        provider = provider_name,
                        "hinted provider is not among available providers"
                    );
                    return Ok(None);
                };
                self.catalog.find_active_model(model_id, provider.id)
            }
            [model_id] => {
                for provider in providers {
                    if let Some(model) = self.catalog.find_active_model(model_id, provider.id)? {
                        return Ok(Some(model));
                    }
                }
                tracing::warn!(model = model_id, "hinted model not found under any available provider");
                Ok(None)
            }
            _ => {
                tracing::warn!(hint, "preferred-model hint has too many path segments");
                Ok(None)
            }
        }
    }

    fn id(&self) -> StrategyId {
        StrategyId::PreferredModel
    }
}
