use std::time::Duration;

use async_trait::async_trait;

use crate::plan::Target;

/// Result of one probe. `status` is `None` when no HTTP response arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub status: Option<u16>,
    pub error: Option<String>,
}

impl ProbeOutcome {
    pub fn status(code: u16) -> Self {
        Self {
            status: Some(code),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: None,
            error: Some(error.into()),
        }
    }

    /// 200..=399 counts as up; redirects are not followed.
    pub fn is_healthy(&self) -> bool {
        matches!(self.status, Some(200..=399))
    }
}

#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, target: &Target) -> ProbeOutcome;
}

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// GET probe over reqwest.
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> brainbytes_core::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| brainbytes_core::BrainBytesError::Internal(format!("http client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, target: &Target) -> ProbeOutcome {
        match self.client.get(&target.url).send().await {
            Ok(resp) => ProbeOutcome::status(resp.status().as_u16()),
            Err(e) => ProbeOutcome::failed(e.to_string()),
        }
    }
}
