//! Levure storefront library.
//!
//! Server-rendered landing page for the Levure bakery. The page itself is
//! static copy loaded from `content/`; the only live state is each
//! visitor's [`levure_core::PageState`] (cart, carousel, overlays), kept in
//! their session and advanced by HTMX form posts.
//!
//! The router is built here rather than in `main` so integration tests can
//! drive it in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::middleware::{
    SessionLocks, SessionRecords, create_session_layer, csp_nonce_middleware,
    request_id_middleware, security_headers_middleware, session_lock_middleware,
};
use crate::state::AppState;

/// Served in place of any image missing from `static/images`.
pub const PLACEHOLDER_IMAGE: &str = "images/placeholder.svg";

/// Build the storefront router with its middleware stack.
///
/// Sentry layers are not included; `main` wraps the result in them.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config(), SessionRecords::default());
    let static_dir = state.config().static_dir.clone();
    let images = ServeDir::new(static_dir.join("images"))
        .fallback(ServeFile::new(static_dir.join(PLACEHOLDER_IMAGE)));

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static/images", images)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(csp_nonce_middleware))
        .layer(session_layer)
        .layer(from_fn_with_state(SessionLocks::new(), session_lock_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
