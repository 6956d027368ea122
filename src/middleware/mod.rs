//! Middleware layer.
//!
//! Cross-cutting concerns live here, applied per handler rather than as a
//! global stack: you decide which routes are instrumented by wrapping their
//! handlers at registration time.
//!
//! - [`trace`] — per-request correlation id, entry/exit logging, latency
//!   measurement, error interception, and observability headers.
//! - [`errors`] — the failure currency at the handler boundary and the
//!   default error-response translator.

pub mod errors;
pub mod trace;

pub use errors::{ApiError, BoxError, error_response};
