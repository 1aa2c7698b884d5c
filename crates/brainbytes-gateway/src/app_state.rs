//! Shared application state for the BrainBytes gateway.
//!
//! Built once at startup and cloned into every handler. Owns the config, the
//! completion provider and the process-wide metrics registry.

use std::sync::Arc;

use brainbytes_core::error::{BrainBytesError, Result};
use brainbytes_core::protocol::health::PlatformInfo;

use crate::config::GatewayConfig;
use crate::obs::ServiceMetrics;
use crate::services::{CompletionProvider, HttpCompletionProvider};

/// Environment variables surfaced in `/api/health` when set.
pub const PLATFORM_ENV: &str = "PLATFORM";
pub const PLATFORM_REGION_ENV: &str = "PLATFORM_REGION";
pub const GIT_COMMIT_ENV: &str = "GIT_COMMIT";

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<ServiceMetrics>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    provider: Arc<dyn CompletionProvider>,
    platform: Option<PlatformInfo>,
}

impl AppState {
    /// Production wiring: HTTP provider keyed from the environment.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        cfg.validate()?;

        let provider = HttpCompletionProvider::from_env(&cfg.ai)?;
        if !provider.has_api_key() {
            // Not fatal: /api/chat reports it per request.
            tracing::warn!(env = %cfg.ai.api_key_env, "completion provider key not set");
        }

        let platform = platform_from_env();
        Ok(Self::from_parts(cfg, Arc::new(provider), platform))
    }

    /// Assemble state from already-built parts (tests, embedding).
    pub fn from_parts(
        cfg: GatewayConfig,
        provider: Arc<dyn CompletionProvider>,
        platform: Option<PlatformInfo>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                provider,
                platform,
            }),
            metrics: Arc::new(ServiceMetrics::new()),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn provider(&self) -> Arc<dyn CompletionProvider> {
        Arc::clone(&self.inner.provider)
    }

    pub fn platform(&self) -> Option<&PlatformInfo> {
        self.inner.platform.as_ref()
    }

    pub fn metrics(&self) -> Arc<ServiceMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn listen_addr(&self) -> Result<std::net::SocketAddr> {
        self.cfg().gateway.listen.parse().map_err(|e| {
            BrainBytesError::Config(format!("gateway.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn platform_from_env() -> Option<PlatformInfo> {
    let var = |k: &str| std::env::var(k).ok().filter(|v| !v.trim().is_empty());
    PlatformInfo {
        name: var(PLATFORM_ENV),
        region: var(PLATFORM_REGION_ENV),
        commit: var(GIT_COMMIT_ENV),
    }
    .non_empty()
}
