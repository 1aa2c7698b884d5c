//! Completion provider.
//!
//! One outbound POST per prompt to an OpenAI-style chat completions endpoint.
//! No retry, no backoff, no queueing: the first failure is the answer.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use brainbytes_core::error::{BrainBytesError, Result};
use brainbytes_core::protocol::chat::ChatRequest;

use crate::config::AiSection;

/// Provider answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    /// Only set when the provider reported usage.
    pub total_tokens: Option<u64>,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Model label used for token accounting.
    fn model(&self) -> &str;
    async fn complete(&self, req: &ChatRequest) -> Result<Completion>;
}

pub struct HttpCompletionProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    system_prompt: String,
    max_tokens: u32,
    temperature: f32,
    timeout: Duration,
    api_key: Option<String>,
}

impl HttpCompletionProvider {
    pub fn new(cfg: &AiSection, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| BrainBytesError::Internal(format!("http client: {e}")))?;
        Ok(Self {
            client,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            system_prompt: cfg.system_prompt.clone(),
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
            timeout: cfg.timeout(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    /// Read the key from the environment variable named in config.
    pub fn from_env(cfg: &AiSection) -> Result<Self> {
        Self::new(cfg, std::env::var(&cfg.api_key_env).ok())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct CompletionBody {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    total_tokens: Option<u64>,
}

fn map_send_error(e: reqwest::Error) -> BrainBytesError {
    if e.is_timeout() {
        BrainBytesError::Timeout
    } else {
        BrainBytesError::Upstream(format!("provider request failed: {e}"))
    }
}

fn excerpt(body: &str) -> &str {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body;
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[async_trait]
impl CompletionProvider for HttpCompletionProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, req: &ChatRequest) -> Result<Completion> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| BrainBytesError::Config("API key not configured".into()))?;

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": self.system_prompt },
                { "role": "user", "content": req.transcript() },
            ],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        });

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(BrainBytesError::Upstream(format!(
                "provider returned {status}: {}",
                excerpt(&text)
            )));
        }

        let parsed: CompletionBody = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                BrainBytesError::Timeout
            } else {
                BrainBytesError::Upstream(format!("malformed provider response: {e}"))
            }
        })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .ok_or_else(|| {
                BrainBytesError::Upstream(
                    "malformed provider response: missing choices[0].message.content".into(),
                )
            })?;

        Ok(Completion {
            text,
            total_tokens: parsed.usage.and_then(|u| u.total_tokens),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_respects_char_boundaries() {
        let s = "é".repeat(150);
        let e = excerpt(&s);
        assert!(e.len() <= 200);
        assert!(s.starts_with(e));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let p = HttpCompletionProvider::new(&AiSection::default(), Some("  ".into())).unwrap();
        assert!(!p.has_api_key());
    }

    #[test]
    fn from_env_builds_without_key() {
        let cfg = AiSection {
            api_key_env: "BRAINBYTES_TEST_UNSET_PROVIDER_KEY".into(),
            ..AiSection::default()
        };
        let p = HttpCompletionProvider::from_env(&cfg).expect("client must build");
        assert!(!p.has_api_key());
        assert_eq!(p.model(), "llama3-8b-8192");
    }
}
