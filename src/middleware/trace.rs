//! Per-request instrumentation middleware.
//!
//! [`wrap`] decorates a fallible handler with the full observability
//! treatment: a correlation id joining the request's log lines and response
//! headers, entry/exit log events, a per-request latency measurement, and
//! interception of handler failures.
//!
//! ```text
//! ➡  id=… GET /users/42  request received
//!        ↓ inner handler runs (Ok → pass through, Err → translator)
//! ⬅  id=… GET /users/42 status=200 elapsed_ms=3  response sent
//!        ↓ stamp x-request-id / x-response-time
//! ```
//!
//! The wrapped handler is infallible: callers only ever observe a well-formed
//! [`Response`], never a raw failure.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use http::header::{HeaderName, HeaderValue};
use tracing::info;
use uuid::Uuid;

use crate::handler::Handler;
use crate::middleware::errors::BoxError;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// Response header carrying the correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Response header carrying the elapsed time in whole milliseconds.
pub const RESPONSE_TIME_HEADER: &str = "x-response-time";

/// Wraps a fallible handler with correlation, logging, timing, and error
/// normalization.
///
/// Per invocation:
///
/// 1. generate a fresh correlation id,
/// 2. record the start instant (inside the invocation — each request is
///    timed on its own, never from wrap time),
/// 3. log `request received` with id, method, and path,
/// 4. await `inner`; on `Err`, the failure goes to `translate`, which owns
///    all status-code and message policy,
/// 5. log `response sent` with id, method, path, status, and elapsed ms,
/// 6. stamp [`REQUEST_ID_HEADER`] and [`RESPONSE_TIME_HEADER`] on the
///    response and return it.
///
/// Both paths converge on the same return type, so no failure ever escapes
/// to the caller of the wrapped handler.
///
/// ```rust,no_run
/// use wicket::middleware::{self, BoxError};
/// use wicket::{Request, Response, Router};
///
/// async fn hello(_req: Request) -> Result<Response, BoxError> {
///     Ok(Response::text("hello"))
/// }
///
/// let app = Router::new()
///     .get("/hello", middleware::trace::wrap(hello, middleware::error_response));
/// ```
pub fn wrap<F, Fut, R, E, T>(inner: F, translate: T) -> impl Handler
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: IntoResponse + Send + 'static,
    E: Into<BoxError> + Send + 'static,
    T: Fn(BoxError) -> Response + Send + Sync + 'static,
{
    // Arc so each invocation's future owns its handles and stays 'static.
    let inner = Arc::new(inner);
    let translate = Arc::new(translate);

    move |req: Request| {
        let inner = Arc::clone(&inner);
        let translate = Arc::clone(&translate);

        async move {
            let request_id = fresh_id();
            let start = Instant::now();
            let method = req.method().clone();
            let path = req.path().to_owned();

            info!(id = %request_id, %method, %path, "request received");

            let mut response = match (*inner)(req).await {
                Ok(r) => r.into_response(),
                Err(e) => (*translate)(e.into()),
            };

            let elapsed_ms = start.elapsed().as_millis() as u64;

            info!(
                id = %request_id,
                %method,
                %path,
                status = response.status_code().as_u16(),
                elapsed_ms,
                "response sent"
            );

            stamp(&mut response, REQUEST_ID_HEADER, &request_id);
            stamp(&mut response, RESPONSE_TIME_HEADER, &elapsed_ms.to_string());
            response
        }
    }
}

/// A fresh correlation id: UUID v4, hyphenated.
///
/// Collision-resistant across concurrent and sequential requests; no
/// ordering or cryptographic guarantee intended.
fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Both stamped values are valid header values by construction, but the
/// wrapper must never fail, so an invalid one is dropped rather than
/// propagated.
fn stamp(response: &mut Response, name: &'static str, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        response.set_header(HeaderName::from_static(name), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::ErasedHandler;
    use crate::middleware::errors::{ApiError, error_response};
    use bytes::Bytes;
    use http::{HeaderMap, Method, StatusCode};
    use std::collections::{HashMap, HashSet};
    use std::io;
    use std::sync::Mutex;
    use std::time::Duration;

    fn request(method: Method, path: &str) -> Request {
        Request::new(
            method,
            path.to_owned(),
            HeaderMap::new(),
            Bytes::new(),
            HashMap::new(),
        )
    }

    async fn invoke(handler: impl Handler, req: Request) -> Response {
        handler.into_boxed_handler().call(req).await
    }

    #[tokio::test]
    async fn success_passes_status_and_body_through() {
        let wrapped = wrap(
            |_req: Request| async { Ok::<_, BoxError>(Response::json(br#"{"name":"Ada"}"#.to_vec())) },
            error_response,
        );
        let res = invoke(wrapped, request(Method::GET, "/users/1")).await;

        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), br#"{"name":"Ada"}"#);
    }

    #[tokio::test]
    async fn both_headers_are_stamped_on_success() {
        let wrapped = wrap(
            |_req: Request| async { Ok::<_, BoxError>(Response::text("ok")) },
            error_response,
        );
        let res = invoke(wrapped, request(Method::GET, "/")).await;

        let id = res.header(REQUEST_ID_HEADER).expect("request id header");
        assert!(!id.is_empty());

        let elapsed = res.header(RESPONSE_TIME_HEADER).expect("response time header");
        let _ms: u64 = elapsed.parse().expect("decimal milliseconds");
    }

    #[tokio::test]
    async fn failure_routes_through_the_translator_unmodified() {
        let wrapped = wrap(
            |_req: Request| async { Err::<Response, BoxError>(ApiError::NotFound.into()) },
            error_response,
        );
        let res = invoke(wrapped, request(Method::GET, "/missing")).await;

        let isolated = error_response(ApiError::NotFound.into());
        assert_eq!(res.status_code(), isolated.status_code());
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(res.body(), isolated.body());
    }

    #[tokio::test]
    async fn both_headers_are_stamped_on_failure() {
        let wrapped = wrap(
            |_req: Request| async { Err::<Response, BoxError>(ApiError::Unauthorized.into()) },
            error_response,
        );
        let res = invoke(wrapped, request(Method::POST, "/admin")).await;

        assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
        assert!(res.header(REQUEST_ID_HEADER).is_some());
        assert!(res.header(RESPONSE_TIME_HEADER).is_some());
    }

    #[tokio::test]
    async fn custom_translators_own_the_status_policy() {
        let wrapped = wrap(
            |_req: Request| async { Err::<Response, BoxError>(ApiError::NotFound.into()) },
            |_err: BoxError| Response::status(StatusCode::IM_A_TEAPOT),
        );
        let res = invoke(wrapped, request(Method::GET, "/teapot")).await;
        assert_eq!(res.status_code(), StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn response_time_reflects_handler_latency() {
        let wrapped = wrap(
            |_req: Request| async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok::<_, BoxError>(Response::text("slow"))
            },
            error_response,
        );
        let res = invoke(wrapped, request(Method::GET, "/slow")).await;

        let ms: u64 = res.header(RESPONSE_TIME_HEADER).unwrap().parse().unwrap();
        assert!(ms >= 50, "reported {ms}ms for a 50ms handler");
    }

    #[tokio::test]
    async fn timing_is_per_invocation_not_per_wrap() {
        // A single wrapped handler invoked twice must report each request's
        // own latency, not time accumulated since wrapping.
        let wrapped = wrap(
            |_req: Request| async { Ok::<_, BoxError>(Response::text("ok")) },
            error_response,
        )
        .into_boxed_handler();

        tokio::time::sleep(Duration::from_millis(60)).await;

        let res = wrapped.call(request(Method::GET, "/")).await;
        let ms: u64 = res.header(RESPONSE_TIME_HEADER).unwrap().parse().unwrap();
        assert!(ms < 50, "reported {ms}ms includes time before the request");
    }

    #[test]
    fn ids_do_not_collide() {
        let ids: HashSet<String> = (0..10_000).map(|_| fresh_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    /// Shared buffer the fmt subscriber writes into, so a test can read the
    /// emitted log lines back.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn log_lines_carry_the_stamped_request_id() {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        // Thread-local default; #[tokio::test] runs on the current thread,
        // so every event from the wrapped handler lands in the capture.
        let _guard = tracing::subscriber::set_default(subscriber);

        let wrapped = wrap(
            |_req: Request| async { Ok::<_, BoxError>(Response::text("ok")) },
            error_response,
        );
        let res = invoke(wrapped, request(Method::GET, "/users/7")).await;
        let id = res.header(REQUEST_ID_HEADER).expect("request id header").to_owned();

        let logs = capture.contents();
        let received = logs
            .lines()
            .find(|line| line.contains("request received"))
            .expect("entry log line");
        let sent = logs
            .lines()
            .find(|line| line.contains("response sent"))
            .expect("exit log line");

        assert!(received.contains(&id), "entry line missing id {id}: {received}");
        assert!(sent.contains(&id), "exit line missing id {id}: {sent}");
    }
}
