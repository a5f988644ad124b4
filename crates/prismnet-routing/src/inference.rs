//! Strategy inference over the flexible request shape
//!
//! Pure: no I/O, no clock. The precedence ladder mirrors how callers
//! actually express intent — an explicit fallback list beats a single
//! model, which beats provider sort options, which beat the legacy
//! explicit field; an empty request routes AUTO.

use prismnet_core::StrategyId;

use crate::error::RoutingError;
use crate::request::{CompletionRequest, ProviderOptions};

/// Outcome of strategy inference
#[derive(Debug, Clone)]
pub struct StrategyInference {
    /// Strategy the request resolves to
    pub strategy: StrategyId,
    /// Preferred-model hint, when the shape carries one
    pub preferred_model: Option<String>,
    /// Provider options carried through for order-aware strategies
    pub provider_options: Option<ProviderOptions>,
}

/// Derive the routing strategy and hints from a request
///
/// # Errors
///
/// Returns [`RoutingError::UnknownStrategy`] only when the legacy
/// `routingStrategy` field names a strategy the registry does not know;
/// the flexible shape never fails.
pub fn infer_strategy(request: &CompletionRequest) -> Result<StrategyInference, RoutingError> {
    let model = request
        .model
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty());
    let has_models = !request.models.is_empty();

    // Fallback list wins outright
    if has_models {
        tracing::debug!("fallback model list supplied, inferring CUSTOM_ORDER");
        return Ok(StrategyInference {
            strategy: StrategyId::CustomOrder,
            preferred_model: None,
            provider_options: request.provider.clone(),
        });
    }

    if let Some(model) = model {
        let strategy = match &request.provider {
            Some(options) => derive_from_provider_options(options),
            None => StrategyId::PreferredModel,
        };
        tracing::debug!(%strategy, model, "single model supplied");
        return Ok(StrategyInference {
            strategy,
            preferred_model: Some(model.to_owned()),
            provider_options: request.provider.clone(),
        });
    }

    if let Some(options) = &request.provider {
        let strategy = derive_from_provider_options(options);
        tracing::debug!(%strategy, "provider options supplied without a model");
        return Ok(StrategyInference {
            strategy,
            preferred_model: None,
            provider_options: request.provider.clone(),
        });
    }

    if let Some(raw) = request
        .routing_strategy
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let strategy = raw
            .to_ascii_uppercase()
            .parse::<StrategyId>()
            .map_err(|_| RoutingError::UnknownStrategy(raw.to_owned()))?;
        tracing::debug!(%strategy, "legacy explicit strategy supplied");
        return Ok(StrategyInference {
            strategy,
            preferred_model: request
                .preferred_model
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_owned),
            provider_options: None,
        });
    }

    tracing::debug!("no routing fields supplied, defaulting to AUTO");
    Ok(StrategyInference {
        strategy: StrategyId::Auto,
        preferred_model: None,
        provider_options: None,
    })
}

/// Map provider options to a strategy
///
/// An explicit `order` means the caller wants deterministic fallback;
/// otherwise the `sort` criterion picks the metric-driven strategy.
/// An unrecognized sort is tolerated, not rejected.
fn derive_from_provider_options(options: &ProviderOptions) -> StrategyId {
    if !options.order.is_empty() {
        return StrategyId::CustomOrder;
    }

    match options.sort.as_deref().map(str::trim) {
        Some(sort) if !sort.is_empty() => match sort.to_ascii_lowercase().as_str() {
            "throughput" => StrategyId::Throughput,
            "latency" => StrategyId::Latency,
            "price" | "cost" => StrategyId::Price,
            other => {
                tracing::warn!(sort = other, "unknown provider sort, defaulting to AUTO");
                StrategyId::Auto
            }
        },
        _ => StrategyId::Auto,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> CompletionRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn empty_request_defaults_to_auto() {
        let result = infer_strategy(&request("{}")).unwrap();
        assert_eq!(result.strategy, StrategyId::Auto);
        assert_eq!(result.preferred_model, None);
    }

    #[test]
    fn model_list_wins_over_everything() {
        let result = infer_strategy(&request(
            r#"{
                "models": ["a", "b"],
                "model": "x",
                "routingStrategy": "PRICE",
                "provider": {"sort": "latency"}
            }"#,
        ))
        .unwrap();
        assert_eq!(result.strategy, StrategyId::CustomOrder);
        assert_eq!(result.preferred_model, None);
        assert!(result.provider_options.is_some());
    }

    #[test]
    fn model_with_sort_derives_metric_strategy() {
        let result = infer_strategy(&request(
            r#"{"model": "x", "provider": {"sort": "latency"}}"#,
        ))
        .unwrap();
        assert_eq!(result.strategy, StrategyId::Latency);
        assert_eq!(result.preferred_model.as_deref(), Some("x"));
    }

    #[test]
    fn model_alone_prefers_that_model() {
        let result = infer_strategy(&request(r#"{"model": "claude-3"}"#)).unwrap();
        assert_eq!(result.strategy, StrategyId::PreferredModel);
        assert_eq!(result.preferred_model.as_deref(), Some("claude-3"));
    }

    #[test]
    fn provider_order_maps_to_custom_order() {
        let result = infer_strategy(&request(
            r#"{"provider": {"order": ["Anthropic", "OpenAI"]}}"#,
        ))
        .unwrap();
        assert_eq!(result.strategy, StrategyId::CustomOrder);
        assert_eq!(result.preferred_model, None);
    }

    #[test]
    fn order_beats_sort_inside_provider_options() {
        let result = infer_strategy(&request(
            r#"{"provider": {"sort": "latency", "order": ["OpenAI"]}}"#,
        ))
        .unwrap();
        assert_eq!(result.strategy, StrategyId::CustomOrder);
    }

    #[test]
    fn price_and_cost_both_map_to_price() {
        for sort in ["price", "cost", "Price", "COST"] {
            let result = infer_strategy(&request(&format!(
                r#"{{"provider": {{"sort": "{sort}"}}}}"#
            )))
            .unwrap();
            assert_eq!(result.strategy, StrategyId::Price, "sort = {sort}");
        }
    }

    #[test]
    fn unknown_sort_degrades_to_auto() {
        let result =
            infer_strategy(&request(r#"{"provider": {"sort": "vibes"}}"#)).unwrap();
        assert_eq!(result.strategy, StrategyId::Auto);
    }

    #[test]
    fn legacy_strategy_applies_when_flexible_fields_absent() {
        let result = infer_strategy(&request(
            r#"{"routingStrategy": "throughput", "preferredModel": "gpt-4"}"#,
        ))
        .unwrap();
        assert_eq!(result.strategy, StrategyId::Throughput);
        assert_eq!(result.preferred_model.as_deref(), Some("gpt-4"));
    }

    #[test]
    fn unknown_legacy_strategy_is_rejected() {
        let err = infer_strategy(&request(r#"{"routingStrategy": "ROUND_ROBIN"}"#)).unwrap_err();
        assert!(matches!(err, RoutingError::UnknownStrategy(s) if s == "ROUND_ROBIN"));
    }

    #[test]
    fn blank_model_is_treated_as_absent() {
        let result = infer_strategy(&request(r#"{"model": "   "}"#)).unwrap();
        assert_eq!(result.strategy, StrategyId::Auto);
    }
}
