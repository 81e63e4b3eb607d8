//! JSON response helpers.
//!
//! # Responsibilities
//! - Write a serializable payload as JSON with a given status code
//! - Provide fixed-status shortcuts for 200, 400 and 500
//! - Wrap error messages in the `{"message": ...}` envelope
//!
//! # Design Decisions
//! - The helpers only delegate; they never log, retry or swallow errors
//! - Every shortcut goes through [`json`]
//! - The context is a trait so handlers and tests can supply their own writer

use axum::http::StatusCode;
use serde::Serialize;

use crate::error::ResponseResult;
use crate::http::envelope::MessageEnvelope;

/// A per-request context that can write one JSON response.
pub trait ResponseContext {
    /// Serialize `payload` as JSON and write it with `status`.
    fn write_json<T>(&mut self, status: StatusCode, payload: &T) -> ResponseResult
    where
        T: Serialize + ?Sized;
}

/// Write `payload` as JSON with status 200.
pub fn ok<C, T>(ctx: &mut C, payload: &T) -> ResponseResult
where
    C: ResponseContext,
    T: Serialize + ?Sized,
{
    json(ctx, StatusCode::OK, payload)
}

/// Write `{"message": message}` with status 400.
pub fn bad_request<C: ResponseContext>(ctx: &mut C, message: &str) -> ResponseResult {
    json(ctx, StatusCode::BAD_REQUEST, &MessageEnvelope::new(message))
}

/// Write `{"message": message}` with status 500.
pub fn internal_server_error<C: ResponseContext>(ctx: &mut C, message: &str) -> ResponseResult {
    json(
        ctx,
        StatusCode::INTERNAL_SERVER_ERROR,
        &MessageEnvelope::new(message),
    )
}

/// Write `payload` as JSON with an arbitrary status code.
pub fn json<C, T>(ctx: &mut C, status: StatusCode, payload: &T) -> ResponseResult
where
    C: ResponseContext,
    T: Serialize + ?Sized,
{
    ctx.write_json(status, payload)
}
