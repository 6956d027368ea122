//! Minimal wicket example — instrumented JSON endpoints.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl -i http://localhost:3000/users/42
//!   curl -i http://localhost:3000/users/0          # not found → 404
//!   curl -i -X POST http://localhost:3000/users \
//!        -H 'content-type: application/json' \
//!        -d '{"name":"alice"}'
//!
//! Every response carries `x-request-id` and `x-response-time` headers, and
//! each request logs a `request received` / `response sent` pair joined by
//! the same id.

use wicket::middleware::{self, ApiError, BoxError};
use wicket::{Request, Response, Router, Server, StatusCode};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let app = Router::new()
        .get("/users/{id}", middleware::trace::wrap(get_user, middleware::error_response))
        .post("/users", middleware::trace::wrap(create_user, middleware::error_response))
        .delete("/users/{id}", middleware::trace::wrap(delete_user, middleware::error_response));

    Server::bind("0.0.0.0:3000")
        .serve(app)
        .await
        .expect("server error");
}

// GET /users/{id}
async fn get_user(req: Request) -> Result<Response, BoxError> {
    let id = req.param("id").ok_or(ApiError::NotFound)?;
    if id == "0" {
        return Err(ApiError::NotFound.into());
    }
    Ok(Response::json(format!(r#"{{"id":"{id}","name":"alice"}}"#).into_bytes()))
}

// POST /users
async fn create_user(req: Request) -> Result<Response, BoxError> {
    if req.body().is_empty() {
        return Err(ApiError::validation("request body is required").into());
    }

    // Real app: let input: CreateUser = serde_json::from_slice(req.body())?;
    Ok(Response::builder()
        .status(StatusCode::CREATED)
        .header("location", "/users/99")
        .json(r#"{"id":"99","name":"new_user"}"#.to_owned().into_bytes()))
}

// DELETE /users/{id} → 204 No Content
async fn delete_user(_req: Request) -> Result<Response, BoxError> {
    Ok(Response::status(StatusCode::NO_CONTENT))
}
