//! Failure currency and the default error-response translator.
//!
//! Handlers wrapped by [`trace::wrap`](crate::middleware::trace::wrap) return
//! `Result<_, E>` for any `E: Into<BoxError>`. The translator passed to
//! `wrap` owns the entire failure-to-response policy; the wrapper never
//! inspects the failure itself. [`error_response`] is the default policy:
//! known [`ApiError`]s map to their status, everything else becomes an opaque
//! 500 so internal details never leak to clients.

use std::error::Error;
use std::fmt;

use http::StatusCode;

use crate::response::Response;

/// The failure type crossing the handler boundary.
///
/// Any `std::error::Error + Send + Sync` converts into it with `?` or
/// `.into()`, so handlers are free to use their own error types.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Expected application failures with a well-defined HTTP mapping.
///
/// ```rust
/// use wicket::middleware::{ApiError, BoxError};
/// use wicket::{Request, Response};
///
/// async fn get_user(req: Request) -> Result<Response, BoxError> {
///     let id = req.param("id").ok_or(ApiError::NotFound)?;
///     if id.is_empty() {
///         return Err(ApiError::validation("id must not be empty").into());
///     }
///     Ok(Response::json(format!(r#"{{"id":"{id}"}}"#).into_bytes()))
/// }
/// ```
#[derive(Debug)]
pub enum ApiError {
    /// 401 — missing or invalid credentials.
    Unauthorized,
    /// 403 — authenticated but not allowed.
    Forbidden,
    /// 404 — the requested entity does not exist.
    NotFound,
    /// 422 — the request was understood but its content is invalid.
    Validation(String),
    /// 500 — an expected-to-be-rare internal failure the handler chose to
    /// surface explicitly.
    Internal,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => f.write_str("unauthorized"),
            Self::Forbidden => f.write_str("forbidden"),
            Self::NotFound => f.write_str("not found"),
            Self::Validation(message) => f.write_str(message),
            Self::Internal => f.write_str("internal server error"),
        }
    }
}

impl Error for ApiError {}

/// The default error-response translator.
///
/// Total over arbitrary failure shapes: an [`ApiError`] maps to its declared
/// status and message; any other failure becomes a generic 500 — its message
/// stays in the logs, not in the response body. The body is always
/// `{"error":{"code":<status>,"message":<text>}}`.
pub fn error_response(err: BoxError) -> Response {
    let (status, message) = match err.downcast_ref::<ApiError>() {
        Some(api) => (api.status(), api.to_string()),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned()),
    };

    let body = serde_json::json!({
        "error": { "code": status.as_u16(), "message": message }
    });
    Response::builder().status(status).json(body.to_string().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn body_json(res: &Response) -> Value {
        serde_json::from_slice(res.body()).expect("error body is JSON")
    }

    #[test]
    fn known_failures_map_to_their_status() {
        let cases = [
            (ApiError::Unauthorized, 401),
            (ApiError::Forbidden, 403),
            (ApiError::NotFound, 404),
            (ApiError::validation("name is required"), 422),
            (ApiError::Internal, 500),
        ];
        for (err, code) in cases {
            let res = error_response(err.into());
            assert_eq!(res.status_code().as_u16(), code);
            assert_eq!(body_json(&res)["error"]["code"], code);
        }
    }

    #[test]
    fn validation_carries_its_message() {
        let res = error_response(ApiError::validation("name is required").into());
        assert_eq!(body_json(&res)["error"]["message"], "name is required");
    }

    #[test]
    fn unknown_failures_become_an_opaque_500() {
        let err: BoxError = std::io::Error::other("connection pool exhausted").into();
        let res = error_response(err);
        assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(&res);
        assert_eq!(body["error"]["message"], "internal server error");
        assert!(!body.to_string().contains("connection pool"));
    }

    #[test]
    fn error_body_is_json() {
        let res = error_response(ApiError::NotFound.into());
        assert_eq!(res.header("content-type"), Some("application/json"));
    }
}
