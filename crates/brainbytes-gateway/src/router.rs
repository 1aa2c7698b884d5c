//! Axum router wiring.

use axum::routing::{get, post};
use axum::{middleware, Router};

use crate::{app_state::AppState, ops, services};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(services::chat::chat))
        .route("/health", get(ops::health))
        .route("/api/health", get(ops::service_health))
        .route("/api/status", get(ops::status))
        .route("/metrics", get(ops::metrics))
        .fallback(ops::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::record_http,
        ))
        .with_state(state)
}
