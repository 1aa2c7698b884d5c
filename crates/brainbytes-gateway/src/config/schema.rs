use std::collections::HashSet;
use std::time::Duration;

use brainbytes_core::error::{BrainBytesError, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub service: ServiceSection,

    #[serde(default)]
    pub ai: AiSection,

    #[serde(default)]
    pub status: StatusSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BrainBytesError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.gateway.validate()?;
        self.ai.validate()?;
        self.status.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.parse::<std::net::SocketAddr>().is_err() {
            return Err(BrainBytesError::BadRequest(format!(
                "gateway.listen must be a valid socket address, got {:?}",
                self.listen
            )));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:3002".into()
}

/// Metadata reported by `/api/health`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSection {
    #[serde(default = "default_service_name")]
    pub name: String,
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            environment: default_environment(),
        }
    }
}

fn default_service_name() -> String {
    "brainbytes-ai-service".into()
}
fn default_environment() -> String {
    "development".into()
}

/// Completion provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AiSection {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the provider key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for AiSection {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl AiSection {
    pub fn validate(&self) -> Result<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(BrainBytesError::BadRequest(
                "ai.endpoint must be an http(s) url".into(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(BrainBytesError::BadRequest("ai.model must not be empty".into()));
        }
        if self.api_key_env.trim().is_empty() {
            return Err(BrainBytesError::BadRequest(
                "ai.api_key_env must not be empty".into(),
            ));
        }
        if !(1000..=120000).contains(&self.timeout_ms) {
            return Err(BrainBytesError::BadRequest(
                "ai.timeout_ms must be between 1000 and 120000".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(BrainBytesError::BadRequest(
                "ai.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_endpoint() -> String {
    "https://api.groq.com/openai/v1/chat/completions".into()
}
fn default_model() -> String {
    "llama3-8b-8192".into()
}
fn default_api_key_env() -> String {
    "GROQ_API_KEY".into()
}
fn default_timeout_ms() -> u64 {
    30000
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_temperature() -> f32 {
    0.7
}
fn default_system_prompt() -> String {
    "You are BrainBytes, a patient tutor for students. Explain concepts step by step \
     in plain language, check for understanding, and keep answers focused on the \
     student's question."
        .into()
}

/// Services listed by `/api/status`. Static; nothing is probed.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct StatusSection {
    #[serde(default)]
    pub services: Vec<MonitoredService>,
}

impl StatusSection {
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for s in &self.services {
            if s.name.trim().is_empty() {
                return Err(BrainBytesError::BadRequest(
                    "status.services[].name must not be empty".into(),
                ));
            }
            if !seen.insert(s.name.as_str()) {
                return Err(BrainBytesError::BadRequest(format!(
                    "status.services has duplicate name: {}",
                    s.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MonitoredService {
    pub name: String,
    pub url: String,
}
