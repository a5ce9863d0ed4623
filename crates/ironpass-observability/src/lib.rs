//! # Ironpass Observability
//!
//! Structured logging for the Ironpass API:
//!
//! - [`init_tracing`]: console output plus daily-rotated error and JSON logs
//! - [`logging_middleware`]: one span-tagged line per request and its outcome

mod logging;
mod middleware;

pub use logging::{LogSettings, init_console_logging, init_tracing};
pub use middleware::logging_middleware;
