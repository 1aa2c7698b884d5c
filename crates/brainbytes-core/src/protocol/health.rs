//! Health documents.

use serde::{Deserialize, Serialize};

/// Minimal liveness body: `{"status":"healthy"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Liveness {
    pub status: String,
}

impl Liveness {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".into(),
        }
    }
}

/// Service metadata served on `/api/health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceHealth {
    pub status: String,
    pub service: String,
    pub version: String,
    pub environment: String,
    /// RFC 3339.
    pub timestamp: String,
    /// Present only when the hosting platform exposed something about itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlatformInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

impl PlatformInfo {
    /// `None` when every field is absent, so the key is dropped from JSON.
    pub fn non_empty(self) -> Option<Self> {
        if self.name.is_none() && self.region.is_none() && self.commit.is_none() {
            None
        } else {
            Some(self)
        }
    }
}
