//! Routing orchestrator
//!
//! The single entry point collaborators call. Validates inputs,
//! snapshots the available providers, resolves and invokes the
//! strategy, and packages the outcome. This is also the only place an
//! empty strategy result becomes a routing failure.

use std::sync::Arc;

use jiff::Timestamp;
use prismnet_core::{
    Model, Provider, ProviderDirectory, RequestRecord, RequestStatus, StrategyId,
};

use crate::error::RoutingError;
use crate::inference::infer_strategy;
use crate::registry::StrategyRegistry;
use crate::request::CompletionRequest;

/// Outcome of a successful routing pass
///
/// Ephemeral: built fresh per request, with no lifecycle once
/// returned. [`RoutingDecision::to_record`] derives the row a
/// persistence collaborator may store.
#[derive(Debug, Clone)]
pub struct RoutingDecision {
    /// Caller the request belongs to
    pub caller_id: String,
    /// Strategy that made the selection
    pub strategy: StrategyId,
    /// Preferred-model hint the strategy saw, if any
    pub preferred_model: Option<String>,
    /// Selected provider
    pub provider: Provider,
    /// Selected model
    pub model: Model,
    /// Prompt text the request carried
    pub prompt: String,
    /// Requested completion budget
    pub max_tokens: Option<u32>,
}

impl RoutingDecision {
    /// Derive the persistable request record for this decision
    pub fn to_record(&self) -> RequestRecord {
        RequestRecord {
            caller_id: self.caller_id.clone(),
            strategy: self.strategy,
            prompt: self.prompt.clone(),
            max_tokens: self.max_tokens,
            provider_id: self.provider.id,
            provider_name: self.provider.name.clone(),
            model_record_id: self.model.id,
            model_id: self.model.model_id.clone(),
            status: RequestStatus::Pending,
            created_at: Timestamp::now(),
        }
    }
}

/// Routes requests to a provider/model pair
pub struct RequestRouter {
    providers: Arc<dyn ProviderDirectory>,
    registry: StrategyRegistry,
}

impl RequestRouter {
    /// Create a router over a provider directory and strategy registry
    pub fn new(providers: Arc<dyn ProviderDirectory>, registry: StrategyRegistry) -> Self {
        Self {
            providers,
            registry,
        }
    }

    /// Route a request with an explicit strategy
    ///
    /// # Errors
    ///
    /// - [`RoutingError::InvalidArgument`] for a blank caller id or
    ///   prompt
    /// - [`RoutingError::NoActiveProviders`] when nothing is available
    /// - [`RoutingError::UnknownStrategy`] when the registry has no
    ///   implementation for `strategy`
    /// - [`RoutingError::NoSuitableModel`] when the strategy finds no
    ///   candidate
    /// - [`RoutingError::ReadFailed`] when a collaborator read fails
    pub fn route(
        &self,
        caller_id: &str,
        strategy: StrategyId,
        prompt: &str,
        max_tokens: Option<u32>,
        preferred_model: Option<&str>,
    ) -> Result<RoutingDecision, RoutingError> {
        if caller_id.trim().is_empty() {
            return Err(RoutingError::InvalidArgument(
                "caller id must not be blank".to_owned(),
            ));
        }
        if prompt.trim().is_empty() {
            return Err(RoutingError::InvalidArgument(
                "prompt must not be blank".to_owned(),
            ));
        }

        tracing::info!(
            caller = caller_id,
            %strategy,
            prompt_chars = prompt.len(),
            max_tokens,
            "routing request"
        );

        let available = self.providers.list_active_providers()?;
        if available.is_empty() {
            tracing::warn!("no active providers available for routing");
            return Err(RoutingError::NoActiveProviders);
        }

        let implementation = self.registry.resolve(strategy)?;
        let selected = implementation.select(&available, caller_id, preferred_model)?;

        let Some(model) = selected else {
            tracing::warn!(
                %strategy,
                providers = available.len(),
                "strategy found no suitable model"
            );
            return Err(RoutingError::NoSuitableModel { strategy });
        };

        let provider = available
            .iter()
            .find(|p| p.id == model.provider_id)
            .cloned()
            .ok_or(RoutingError::NoSuitableModel { strategy })?;

        tracing::info!(
            provider = %provider.name,
            model = %model.model_id,
            %strategy,
            "routing decision made"
        );

        Ok(RoutingDecision {
            caller_id: caller_id.to_owned(),
            strategy,
            preferred_model: preferred_model.map(str::to_owned),
            provider,
            model,
            prompt: prompt.to_owned(),
            max_tokens,
        })
    }

    /// Route a chat-completion request, inferring the strategy from
    /// its shape
    ///
    /// # Errors
    ///
    /// As [`RequestRouter::route`], plus
    /// [`RoutingError::UnknownStrategy`] when the legacy strategy
    /// field names an unrecognized strategy
    pub fn route_completion(
        &self,
        caller_id: &str,
        request: &CompletionRequest,
    ) -> Result<RoutingDecision, RoutingError> {
        let inference = infer_strategy(request)?;
        let prompt = request.prompt_text();

        self.route(
            caller_id,
            inference.strategy,
            &prompt,
            request.max_tokens,
            inference.preferred_model.as_deref(),
        )
    }

    /// Snapshot of the currently active providers
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::ReadFailed`] when the directory read
    /// fails
    pub fn available_providers(&self) -> Result<Vec<Provider>, RoutingError> {
        Ok(self.providers.list_active_providers()?)
    }
}
