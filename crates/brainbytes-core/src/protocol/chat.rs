//! AI proxy wire types (`POST /api/chat`).

use serde::{Deserialize, Serialize};

use crate::error::{BrainBytesError, Result};

/// Inbound chat prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
    /// Prior turns, already flattened to text by the frontend.
    #[serde(default, rename = "conversationHistory")]
    pub conversation_history: Option<String>,
}

impl ChatRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            conversation_history: None,
        }
    }

    pub fn with_history(mut self, history: impl Into<String>) -> Self {
        self.conversation_history = Some(history.into());
        self
    }

    /// Reject prompts that carry no text.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(BrainBytesError::BadRequest("prompt is required".into()));
        }
        Ok(())
    }

    /// User turn sent to the provider (history + prompt, textual).
    pub fn transcript(&self) -> String {
        transcript(self.conversation_history.as_deref(), &self.prompt)
    }
}

/// Concatenate conversation history and the new prompt into one user turn.
///
/// Blank history is ignored so a first message is sent verbatim.
pub fn transcript(history: Option<&str>, prompt: &str) -> String {
    match history.map(str::trim).filter(|h| !h.is_empty()) {
        Some(h) => format!("{h}\nUser: {prompt}"),
        None => prompt.to_string(),
    }
}

/// Successful reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    pub response: String,
}

/// Error body shared by every JSON endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&BrainBytesError> for ErrorBody {
    fn from(e: &BrainBytesError) -> Self {
        Self { error: e.to_string() }
    }
}
