//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use brainbytes_core::error::{BrainBytesError, Result};

pub use schema::{
    AiSection, GatewayConfig, GatewaySection, MonitoredService, ServiceSection, StatusSection,
};

/// Environment variable naming the config file for the binary.
pub const CONFIG_PATH_ENV: &str = "BRAINBYTES_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "brainbytes.yaml";

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| BrainBytesError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| BrainBytesError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
