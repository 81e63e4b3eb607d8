//! HTTP server setup and demo routes.
//!
//! # Responsibilities
//! - Create the Axum Router with the demo handlers
//! - Wire up middleware (tracing, request timeout, request ID)
//! - Bind server to listener and serve until shutdown
//! - Decide what happens to errors returned by the response helpers
//!
//! # Design Decisions
//! - Every handler writes through `JsonContext` and the helpers in `response.rs`
//! - Helper errors are logged here, at the caller, and answered with a generic 500
//! - Request IDs are generated when absent and echoed on every response

use std::future::Future;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::error::ResponseError;
use crate::http::context::JsonContext;
use crate::http::envelope::MessageEnvelope;
use crate::http::response;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// HTTP server exposing the demo routes.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            router: Self::build_router(&config),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/echo", post(echo))
            .route("/status/{code}", post(with_status))
            .route("/fail", get(fail))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.http.request_timeout_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The configured router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until Ctrl+C.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.run_until(listener, shutdown_signal()).await
    }

    /// Run the server until `shutdown` resolves.
    pub async fn run_until<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

impl IntoResponse for ResponseError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Failed to write JSON response");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageEnvelope::new("internal server error")),
        )
            .into_response()
    }
}

async fn health(mut ctx: JsonContext) -> Result<JsonContext, ResponseError> {
    response::ok(
        &mut ctx,
        &HealthStatus {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    )?;
    Ok(ctx)
}

/// Echo the request body back as JSON.
async fn echo(mut ctx: JsonContext, body: Bytes) -> Result<JsonContext, ResponseError> {
    match serde_json::from_slice::<Value>(&body) {
        Ok(payload) => response::ok(&mut ctx, &payload)?,
        Err(e) => {
            tracing::debug!(error = %e, "Rejecting malformed echo body");
            response::bad_request(&mut ctx, &format!("invalid JSON body: {e}"))?
        }
    }
    Ok(ctx)
}

/// Answer with the status code from the path and the request body (or `null`).
async fn with_status(
    Path(code): Path<String>,
    mut ctx: JsonContext,
    body: Bytes,
) -> Result<JsonContext, ResponseError> {
    let parsed = code
        .parse::<u16>()
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok());
    let Some(status) = parsed else {
        response::bad_request(&mut ctx, &format!("unsupported status code: {code}"))?;
        return Ok(ctx);
    };

    let payload = if body.is_empty() {
        Value::Null
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(payload) => payload,
            Err(e) => {
                response::bad_request(&mut ctx, &format!("invalid JSON body: {e}"))?;
                return Ok(ctx);
            }
        }
    };

    match response::json(&mut ctx, status, &payload) {
        Ok(()) => {}
        // The status came from the client, so a bodyless one is their mistake.
        Err(err @ ResponseError::BodyNotAllowed(_)) => {
            response::bad_request(&mut ctx, &err.to_string())?
        }
        Err(err) => return Err(err),
    }
    Ok(ctx)
}

async fn fail(mut ctx: JsonContext) -> Result<JsonContext, ResponseError> {
    response::internal_server_error(&mut ctx, "simulated failure")?;
    Ok(ctx)
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn build_test_app() -> Router {
        HttpServer::new(ServerConfig::default()).router()
    }

    async fn send(request: Request<Body>) -> (StatusCode, Response) {
        let response = build_test_app().oneshot(request).await.unwrap();
        (response.status(), response)
    }

    async fn json_body(response: Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("expected response body");
        serde_json::from_slice(&body).expect("expected json body")
    }

    #[tokio::test]
    async fn test_health_returns_200() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let (status, response) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert!(response.headers().contains_key("x-request-id"));
        let payload = json_body(response).await;
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_echo_returns_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/echo")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"items":[1,2],"label":"x"}"#))
            .unwrap();

        let (status, response) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        let payload = json_body(response).await;
        assert_eq!(payload, serde_json::json!({"items": [1, 2], "label": "x"}));
    }

    #[tokio::test]
    async fn test_echo_rejects_malformed_json() {
        let request = Request::builder()
            .method("POST")
            .uri("/echo")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, response) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let payload = json_body(response).await;
        let object = payload.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(object["message"]
            .as_str()
            .unwrap()
            .starts_with("invalid JSON body: "));
    }

    #[tokio::test]
    async fn test_echo_pretty_query_indents() {
        let request = Request::builder()
            .method("POST")
            .uri("/echo?pretty")
            .body(Body::from(r#"{"a":1}"#))
            .unwrap();

        let (status, response) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"{\n  \"a\": 1\n}");
    }

    #[tokio::test]
    async fn test_status_route_uses_path_code() {
        let request = Request::builder()
            .method("POST")
            .uri("/status/202")
            .body(Body::from(r#"["queued"]"#))
            .unwrap();

        let (status, response) = send(request).await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(json_body(response).await, serde_json::json!(["queued"]));
    }

    #[tokio::test]
    async fn test_status_route_without_body_writes_null() {
        let request = Request::builder()
            .method("POST")
            .uri("/status/418")
            .body(Body::empty())
            .unwrap();

        let (status, response) = send(request).await;

        assert_eq!(status, StatusCode::IM_A_TEAPOT);
        assert_eq!(json_body(response).await, Value::Null);
    }

    #[tokio::test]
    async fn test_status_route_rejects_out_of_range_code() {
        let request = Request::builder()
            .method("POST")
            .uri("/status/1000")
            .body(Body::empty())
            .unwrap();

        let (status, response) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["message"],
            "unsupported status code: 1000"
        );
    }

    #[tokio::test]
    async fn test_status_route_rejects_non_numeric_codes() {
        for code in ["abc", "70000", "-1"] {
            let request = Request::builder()
                .method("POST")
                .uri(format!("/status/{code}"))
                .body(Body::empty())
                .unwrap();

            let (status, response) = send(request).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "code {code}");
            assert_eq!(
                json_body(response).await,
                serde_json::json!({"message": format!("unsupported status code: {code}")})
            );
        }
    }

    #[tokio::test]
    async fn test_status_route_rejects_bodyless_codes() {
        for (code, reason) in [
            ("100", "100 Continue"),
            ("204", "204 No Content"),
            ("304", "304 Not Modified"),
        ] {
            let request = Request::builder()
                .method("POST")
                .uri(format!("/status/{code}"))
                .body(Body::from(r#"{"k":1}"#))
                .unwrap();

            let (status, response) = send(request).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "code {code}");
            assert_eq!(
                json_body(response).await["message"],
                format!("status {reason} does not allow a response body")
            );
        }
    }

    #[tokio::test]
    async fn test_fail_returns_500_envelope() {
        let request = Request::builder()
            .uri("/fail")
            .body(Body::empty())
            .unwrap();

        let (status, response) = send(request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"message": "simulated failure"})
        );
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let request = Request::builder()
            .uri("/health")
            .header("x-request-id", "req-123")
            .body(Body::empty())
            .unwrap();

        let (_, response) = send(request).await;

        assert_eq!(response.headers().get("x-request-id").unwrap(), "req-123");
    }

    #[tokio::test]
    async fn test_response_error_becomes_generic_500() {
        let response = ResponseError::AlreadyCommitted.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"message": "internal server error"})
        );
    }
}
