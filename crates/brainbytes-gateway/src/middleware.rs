//! Per-request metrics recording.

use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::app_state::AppState;
use crate::obs::HttpLabels;

/// Route label used when no route matched (404s).
pub const UNMATCHED_ROUTE: &str = "unmatched";

pub async fn record_http(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_owned());

    let resp = next.run(req).await;

    let elapsed = started.elapsed();
    let status = resp.status().as_u16();
    state.metrics().record_http(
        HttpLabels {
            method: method.as_str(),
            route: &route,
            status,
        },
        elapsed,
    );
    tracing::debug!(
        %method,
        route = %route,
        status,
        elapsed_ms = elapsed.as_millis() as u64,
        "request handled"
    );

    resp
}
