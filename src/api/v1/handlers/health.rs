/*
 * Responsibility
 * - GET /health (liveness probe, no state involved)
 */
use axum::http::StatusCode;

pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
