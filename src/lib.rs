//! # wicket
//!
//! A minimal HTTP framework whose main feature is instrumented route
//! handlers: every request gets a correlation id, entry/exit log lines,
//! a latency measurement, and normalized error responses — without the
//! handler author writing any of that.
//!
//! ## The contract
//!
//! You write fallible business logic:
//!
//! ```text
//! async fn handler(req: Request) -> Result<Response, BoxError>
//! ```
//!
//! [`middleware::trace::wrap`] turns it into an infallible handler that
//!
//! - assigns a fresh `x-request-id` per request,
//! - logs `request received` / `response sent` with method, path, status
//!   and elapsed milliseconds,
//! - converts an `Err` into a structured error response via a translator
//!   you choose ([`middleware::error_response`] is the default),
//! - stamps `x-request-id` and `x-response-time` headers on every
//!   response, success or failure.
//!
//! Callers of the wrapped handler only ever see a well-formed response.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use wicket::middleware::{self, ApiError, BoxError};
//! use wicket::{Request, Response, Router, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .get("/users/{id}", middleware::trace::wrap(get_user, middleware::error_response));
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//!
//! async fn get_user(req: Request) -> Result<Response, BoxError> {
//!     let id = req.param("id").ok_or(ApiError::NotFound)?;
//!     Ok(Response::json(format!(r#"{{"id":"{id}"}}"#).into_bytes()))
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod middleware;
pub mod url;

pub use error::Error;
pub use handler::Handler;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;

// Method and status types come straight from the `http` crate — wicket adds
// nothing on top of them.
pub use http::{Method, StatusCode};
