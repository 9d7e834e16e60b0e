/*
 * Responsibility
 * - tracing / panic hook setup
 * - Config load -> AppState -> Router assembly
 * - Middleware (request id, body limit, trace, response headers)
 * - bind + axum::serve (bind failure is the only fatal runtime error)
 */
use std::{panic, process};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::health::health;
use crate::config::Config;
use crate::middleware;
use crate::services::valid_tans::ValidTans;
use crate::state::AppState;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Routes panics through tracing. The process only dies when `abort` is set
/// (ABORT_ON_PANIC); otherwise the panicking request gets a 500 from
/// `CatchPanicLayer` and the server keeps serving.
fn init_panic_hook(abort: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, abort, "panic");
        default_hook(info);

        if abort {
            process::abort();
        }
    }))
}

fn panic_hook_aborts(config: &Config) -> bool {
    config.abort_on_panic
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(panic_hook_aborts(&config));

    let state = build_state(&config)?;

    tracing::info!(
        status_mode = ?config.status_mode,
        valid_tans = state.valid_tans.len(),
        max_body_bytes = config.max_body_bytes,
        "starting tan verification service"
    );

    let app = build_router(state, config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind((config.ip.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.ip, config.port))?;
    tracing::info!("listening on {}, port {}", config.ip, config.port);

    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState> {
    let valid_tans = ValidTans::new(&config.valid_tans)?;
    Ok(AppState::new(valid_tans, config.status_mode))
}

pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .nest("/version/v1", api::v1::routes())
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    middleware::http::apply(router, max_body_bytes)
}
