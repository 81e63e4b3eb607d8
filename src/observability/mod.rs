//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the server produce:
//!     → tracing events with structured fields
//!     → TraceLayer spans per request (x-request-id on every response)
//!
//! logging.rs installs the subscriber that writes them to stdout.
//! ```

pub mod logging;

pub use logging::init_logging;
