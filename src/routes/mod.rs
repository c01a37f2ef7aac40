pub mod search;

use crate::models::responses::INTERNAL_ERROR;
use axum::{
    http::{header::HOST, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use search::{search_proxy, Upstream};
use std::any::Any;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{MakeSpan, OnResponse, TraceLayer};
use tracing::{error, info, info_span, Span};

/// Every path and method is served by the search proxy.
pub fn create_router(upstream: Upstream) -> Router {
    let router = Router::new().fallback(search_proxy).with_state(upstream);
    with_middleware(router)
}

/// Request logging outside, panic recovery inside, so recovered panics are logged as 500s.
pub fn with_middleware(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(RequestSpan)
                    .on_response(LogResponse),
            )
            .layer(CatchPanicLayer::custom(handle_panic)),
    )
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let host = request
            .headers()
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-");

        info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            host = %host,
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogResponse;

impl<B> OnResponse<B> for LogResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        info!(
            status = response.status().as_u16(),
            latency_ms = latency.as_millis() as u64,
            "request completed"
        );
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    error!("Handler panicked: {}", detail);

    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR).into_response()
}
