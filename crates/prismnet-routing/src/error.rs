//! Routing-specific error types

use http::StatusCode;
use prismnet_core::{HttpError, StoreError, StrategyId};
use thiserror::Error;

/// Errors that can occur while routing a request
///
/// "No match" inside a strategy is not an error; strategies report it
/// through their return value and the orchestrator converts it into
/// [`RoutingError::NoSuitableModel`] here.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Caller-supplied field was missing or malformed
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Strategy identifier not recognized by the registry
    #[error("unknown routing strategy: {0}")]
    UnknownStrategy(String),

    /// No active providers to route across
    #[error("no active providers available for routing")]
    NoActiveProviders,

    /// The resolved strategy produced no candidate
    #[error("no suitable model found for routing strategy: {strategy}")]
    NoSuitableModel {
        /// Strategy that came up empty
        strategy: StrategyId,
    },

    /// A collaborator read failed mid-selection
    #[error(transparent)]
    ReadFailed(#[from] StoreError),
}

impl HttpError for RoutingError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArgument(_)
            | Self::UnknownStrategy(_)
            | Self::NoActiveProviders
            | Self::NoSuitableModel { .. } => StatusCode::BAD_REQUEST,
            Self::ReadFailed(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidArgument(_) => "invalid_request_error",
            Self::UnknownStrategy(_) => "configuration_error",
            Self::NoActiveProviders | Self::NoSuitableModel { .. } => "routing_error",
            Self::ReadFailed(_) => "upstream_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::ReadFailed(_) => "routing data temporarily unavailable".to_owned(),
            other => other.to_string(),
        }
    }
}
