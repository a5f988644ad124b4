//! Custom-order routing
//!
//! Walks the caller's active rules in ascending rule-id order. Each
//! rule carries a provider priority list; the first rule that matches
//! an available provider's active model decides the request and later
//! rules are never consulted. A malformed rule is skipped, not fatal.

use std::collections::HashMap;
use std::sync::Arc;

use prismnet_core::{
    Model, ModelCatalog, Provider, ProviderId, RoutingRule, RoutingRuleStore, StoreError,
    StrategyId,
};

use crate::strategy::Strategy;

/// Select a model from the caller's provider priority rules
pub struct CustomOrderStrategy {
    catalog: Arc<dyn ModelCatalog>,
    rules: Arc<dyn RoutingRuleStore>,
    default_caller_id: String,
}

impl CustomOrderStrategy {
    /// Create the strategy over a catalog and rule store
    pub fn new(
        catalog: Arc<dyn ModelCatalog>,
        rules: Arc<dyn RoutingRuleStore>,
        default_caller_id: String,
    ) -> Self {
        Self {
            catalog,
            rules,
            default_caller_id,
        }
    }

    /// Apply one rule against the available models
    ///
    /// Returns the active model whose provider sits earliest in the
    /// rule's order, restricted to available providers.
    fn apply_rule(
        &self,
        rule: &RoutingRule,
        providers_by_name: &HashMap<&str, &Provider>,
        models: &[Model],
    ) -> Option<Model> {
        let order = match rule.parsed_order() {
            Ok(order) => order,
            Err(error) => {
                tracing::warn!(
                    rule = %rule.name,
                    rule_id = %rule.id,
                    %error,
                    "skipping malformed routing rule"
                );
                return None;
            }
        };

        // Priority index restricted to available providers; on duplicate
        // names the earliest position wins
        let mut priority: HashMap<ProviderId, usize> = HashMap::new();
        for (position, name) in order.iter().enumerate() {
            if let Some(provider) = providers_by_name.get(name.trim()) {
                priority.entry(provider.id).or_insert(position);
            }
        }

        models
            .iter()
            .filter_map(|m| priority.get(&m.provider_id).map(|&p| (m, p)))
            .min_by_key(|&(_, position)| position)
            .map(|(m, _)| m.clone())
    }
}

impl Strategy for CustomOrderStrategy {
    fn select(
        &self,
        providers: &[Provider],
        caller_id: &str,
        _preferred_model: Option<&str>,
    ) -> Result<Option<Model>, StoreError> {
        if providers.is_empty() {
            return Ok(None);
        }

        let caller = if caller_id.trim().is_empty() {
            &self.default_caller_id
        } else {
            caller_id
        };

        let rules = self.rules.active_rules_for(caller)?;
        if rules.is_empty() {
            tracing::warn!(caller, "no active routing rules for caller");
            return Ok(None);
        }

        let provider_ids: Vec<_> = providers.iter().map(|p| p.id).collect();
        let models = self.catalog.list_active_models(&provider_ids)?;
        let providers_by_name: HashMap<&str, &Provider> =
            providers.iter().map(|p| (p.name.as_str(), p)).collect();

        for rule in &rules {
            if let Some(model) = self.apply_rule(rule, &providers_by_name, &models) {
                tracing::debug!(
                    rule = %rule.name,
                    model = %model.model_id,
                    "custom-order rule matched"
                );
                return Ok(Some(model));
            }
        }

        tracing::warn!(caller, rules = rules.len(), "no rule matched an available provider");
        Ok(None)
    }

    fn id(&self) -> StrategyId {
        StrategyId::CustomOrder
    }
}
