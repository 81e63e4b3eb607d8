//! Error types for writing JSON responses.

use thiserror::Error;

/// Errors surfaced by the response helpers.
///
/// The helpers never log or recover from these; they hand them back to the
/// route handler unchanged.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The payload could not be serialized as JSON.
    #[error("failed to serialize response payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The HTTP response could not be assembled.
    #[error("failed to build response: {0}")]
    Build(#[from] axum::http::Error),

    /// The status code forbids a response body (1xx, 204, 304).
    #[error("status {0} does not allow a response body")]
    BodyNotAllowed(axum::http::StatusCode),

    /// A response was already written to this context.
    #[error("response already committed")]
    AlreadyCommitted,
}

/// Result type for response helper operations.
pub type ResponseResult<T = ()> = Result<T, ResponseError>;
