/*
 * Responsibility
 * - v1 URL layout (nested under /version/v1 by app.rs)
 * - /tan/verify accepts every method; the handler rejects non-POST itself
 */
use axum::{Router, routing::any};

use crate::api::v1::handlers::tan::verify_tan;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/tan/verify", any(verify_tan))
}
