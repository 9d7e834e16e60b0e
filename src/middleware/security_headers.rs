//! Response headers for verification responses.
//!
//! Responsibility:
//! - MIME sniffing protection on the plain-text error bodies
//! - Keep verification outcomes out of intermediary caches
//!
//! Headers already set by a handler win (`if_not_present`).

use axum::Router;
use axum::http::header::{self, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

pub fn apply(router: Router) -> Router {
    router
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}
