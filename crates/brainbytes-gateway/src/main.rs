//! BrainBytes gateway binary.
//!
//! - `POST /api/chat` proxied to the completion provider
//! - health, status and metrics endpoints
//! - config path from `BRAINBYTES_CONFIG` (default `brainbytes.yaml`)

use tracing_subscriber::{fmt, EnvFilter};

use brainbytes_core::error::{BrainBytesError, Result};
use brainbytes_gateway::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var(config::CONFIG_PATH_ENV)
        .unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_file(&path)?;

    let state = app_state::AppState::new(cfg)?;
    let listen = state.listen_addr()?;
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "brainbytes-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| BrainBytesError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BrainBytesError::Internal(format!("server failed: {e}")))?;

    tracing::info!("brainbytes-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
