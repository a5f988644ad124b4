use http::StatusCode;

/// Trait for domain errors that cross the transport boundary
///
/// Implemented by each feature crate's error type. The transport layer
/// turns these into wire responses, so domain errors never depend on a
/// web framework.
pub trait HttpError: std::error::Error {
    /// Status code this error maps to
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}
