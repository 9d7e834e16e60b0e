//! HTTP-level middleware (cross-cutting concerns).
//!
//! Applies to every route, including the fallback 404.
//!
//! Responsibility:
//! - Request-Id generation + propagation (X-Request-Id)
//! - Access logging / request tracing (TraceLayer)
//! - Body size limit (enforced when a handler buffers the body)
//! - Panics inside a request become a 500 for that request only
//!
//! No timeout layer: slow clients are left to hyper's defaults.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::HeaderName;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

/// Apply HTTP-level middleware to the given Router.
///
/// `max_body_bytes` replaces axum's built-in 2 MiB default, in both
/// directions. Bodies over the limit are answered with 413.
pub fn apply(router: Router, max_body_bytes: usize) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let layers = ServiceBuilder::new()
        // Generate a request id if missing, then propagate it to the response.
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .layer(DefaultBodyLimit::max(max_body_bytes));

    router.layer(layers)
}
