//! JSON response helpers for Axum handlers.

pub mod config;
pub mod error;
pub mod http;
pub mod observability;

pub use config::schema::ServerConfig;
pub use error::{ResponseError, ResponseResult};
pub use http::{
    bad_request, internal_server_error, json, ok, HttpServer, JsonContext, MessageEnvelope,
    ResponseContext,
};
