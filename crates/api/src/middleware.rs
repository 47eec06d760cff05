use std::time::Duration;

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use tower_http::request_id::RequestId;
use tracing::Span;

use crate::context::{RequestContext, REQUEST_ID_HEADER};

/// Expose the request id set by `SetRequestIdLayer` as a [`RequestContext`].
pub async fn request_context(mut req: Request, next: Next) -> Response {
    let ctx = req
        .extensions()
        .get::<RequestId>()
        .and_then(RequestContext::from_request_id);
    if let Some(ctx) = ctx {
        req.extensions_mut().insert(ctx);
    }
    next.run(req).await
}

/// Span for `TraceLayer`: one `http.request` per request, tagged with its id.
pub fn request_span(req: &Request) -> Span {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "http.request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    )
}

pub fn log_response(res: &Response, latency: Duration, _span: &Span) {
    tracing::info!(
        status = res.status().as_u16(),
        latency_ms = latency.as_millis() as u64,
        "request completed"
    );
}
