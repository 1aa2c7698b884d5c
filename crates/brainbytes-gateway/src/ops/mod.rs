//! Operational HTTP endpoints.
//!
//! - `/health`     : liveness
//! - `/api/health` : service metadata
//! - `/api/status` : configured service URLs (static, not probed)
//! - `/metrics`    : Prometheus text format
//!
//! Anything else gets a JSON 404.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use brainbytes_core::protocol::chat::ErrorBody;
use brainbytes_core::protocol::health::{Liveness, ServiceHealth};

use crate::app_state::AppState;
use crate::config::MonitoredService;

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub async fn health() -> Json<Liveness> {
    Json(Liveness::healthy())
}

pub async fn service_health(State(state): State<AppState>) -> Json<ServiceHealth> {
    let svc = &state.cfg().service;
    Json(ServiceHealth {
        status: "healthy".into(),
        service: svc.name.clone(),
        version: env!("CARGO_PKG_VERSION").into(),
        environment: svc.environment.clone(),
        timestamp: now_rfc3339(),
        platform: state.platform().cloned(),
    })
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub status: &'static str,
    pub services: Vec<MonitoredService>,
    pub timestamp: String,
}

/// Reports configuration only; "configured" says nothing about liveness.
pub async fn status(State(state): State<AppState>) -> Json<StatusReport> {
    Json(StatusReport {
        status: "configured",
        services: state.cfg().status.services.clone(),
        timestamp: now_rfc3339(),
    })
}

pub async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "not found".into(),
        }),
    )
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
