//! Chat-completion request shape accepted at the gateway boundary
//!
//! Two generations of routing fields coexist: the legacy explicit
//! `routingStrategy`/`preferredModel` pair and the flexible
//! `model`/`models`/`provider` trio. [`crate::infer_strategy`] resolves
//! them into a single strategy; flexible fields win when populated.

use serde::Deserialize;

/// Inbound chat-completion request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletionRequest {
    /// Legacy explicit strategy wire name (e.g. `"PRICE"`)
    pub routing_strategy: Option<String>,
    /// Legacy preferred-model hint
    pub preferred_model: Option<String>,
    /// Single target model, `provider/model` or bare `model`
    pub model: Option<String>,
    /// Ordered fallback model list
    pub models: Vec<String>,
    /// Provider selection options
    pub provider: Option<ProviderOptions>,
    /// Conversation turns
    pub messages: Vec<ChatMessage>,
    /// Completion budget
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f64>,
    /// Whether the caller wants a streamed response
    pub stream: bool,
}

impl CompletionRequest {
    /// Flatten the conversation into a single prompt string
    pub fn prompt_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Provider selection options on the flexible request shape
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderOptions {
    /// Ranking criterion: `throughput`, `latency`, `price`, or `cost`
    pub sort: Option<String>,
    /// Explicit provider priority order, index 0 first
    pub order: Vec<String>,
    /// Whether falling back past the first choice is allowed
    pub allow_fallbacks: Option<bool>,
}

/// One conversation turn
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    /// Speaker role (`system`, `user`, `assistant`)
    pub role: String,
    /// Turn text
    pub content: String,
}
