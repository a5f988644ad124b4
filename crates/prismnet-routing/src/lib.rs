//! Routing decision engine for PrismNet
//!
//! Picks, for every inbound chat-completion request, which backend
//! provider/model pair should serve it:
//! - **inference** maps a flexible request shape to one strategy
//! - **strategies** rank candidates by price, freshness metrics,
//!   weighted score, caller-defined order, or an explicit model hint
//! - **the orchestrator** validates inputs, resolves the strategy, and
//!   packages the decision into a persistable record

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
pub mod inference;
pub mod metrics;
pub mod registry;
pub mod request;
pub mod router;
pub mod strategy;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::RoutingError;
pub use inference::{StrategyInference, infer_strategy};
pub use registry::StrategyRegistry;
pub use request::{ChatMessage, CompletionRequest, ProviderOptions};
pub use router::{RequestRouter, RoutingDecision};
pub use strategy::Strategy;
