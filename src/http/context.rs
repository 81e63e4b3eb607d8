//! Axum-backed response context.
//!
//! Handlers take a [`JsonContext`] as an extractor, write through the helpers
//! in [`crate::http::response`], and return the context as their response.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::{
    body::Body,
    extract::{FromRequestParts, Query},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::{ResponseError, ResponseResult};
use crate::http::response::ResponseContext;

const APPLICATION_JSON: &str = "application/json";

/// Holds at most one JSON response for the current request.
#[derive(Debug, Default)]
pub struct JsonContext {
    pretty: bool,
    response: Option<Response>,
}

impl JsonContext {
    /// Create a context that writes compact JSON.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context that indents JSON bodies.
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            response: None,
        }
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Whether a response has been written.
    pub fn is_committed(&self) -> bool {
        self.response.is_some()
    }

    /// Status of the written response, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.response.as_ref().map(|r| r.status())
    }
}

impl ResponseContext for JsonContext {
    fn write_json<T>(&mut self, status: StatusCode, payload: &T) -> ResponseResult
    where
        T: Serialize + ?Sized,
    {
        if self.response.is_some() {
            return Err(ResponseError::AlreadyCommitted);
        }
        if !allows_body(status) {
            return Err(ResponseError::BodyNotAllowed(status));
        }

        // Serialize up front so a failure leaves nothing behind.
        let body = if self.pretty {
            serde_json::to_vec_pretty(payload)?
        } else {
            serde_json::to_vec(payload)?
        };

        let response = Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, APPLICATION_JSON)
            .body(Body::from(body))?;

        self.response = Some(response);
        Ok(())
    }
}

impl IntoResponse for JsonContext {
    fn into_response(self) -> Response {
        self.response
            .unwrap_or_else(|| StatusCode::NO_CONTENT.into_response())
    }
}

impl<S> FromRequestParts<S> for JsonContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A query that does not parse just means compact output.
        let pretty = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(params)| params.contains_key("pretty"))
            .unwrap_or(false);
        Ok(Self {
            pretty,
            response: None,
        })
    }
}

/// 1xx, 204 and 304 responses never carry a body on the wire.
fn allows_body(status: StatusCode) -> bool {
    !(status.is_informational()
        || status == StatusCode::NO_CONTENT
        || status == StatusCode::NOT_MODIFIED)
}
