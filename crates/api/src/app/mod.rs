//! HTTP API application wiring (Axum router + middleware stack).
//!
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `extract.rs`: request buffering and the `Valid<T>` extractor
//! - `dto.rs`: per-route input contracts and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::context::MakeRequestUuidV7;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod extract;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> Router {
    Router::new()
        .merge(routes::router())
        .fallback(routes::system::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::request_span)
                        .on_response(middleware::log_response),
                )
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(axum::middleware::from_fn(middleware::request_context))
                .layer(DefaultBodyLimit::max(config.body_limit)),
        )
}
