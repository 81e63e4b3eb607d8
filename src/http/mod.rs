//! HTTP response subsystem.
//!
//! # Data Flow
//! ```text
//! Request
//!     → server.rs (Axum router, middleware)
//!     → handler extracts a JsonContext (context.rs)
//!     → response.rs helpers (ok / bad_request / internal_server_error / json)
//!     → envelope.rs wraps error messages as {"message": ...}
//!     → JsonContext converted into the HTTP response
//! ```

pub mod context;
pub mod envelope;
pub mod response;
pub mod server;

pub use context::JsonContext;
pub use envelope::MessageEnvelope;
pub use response::{bad_request, internal_server_error, json, ok, ResponseContext};
pub use server::HttpServer;
