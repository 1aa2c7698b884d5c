//! Shared error type across BrainBytes crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// Required configuration (e.g. provider key) is missing or invalid.
    Config,
    /// The completion provider failed or answered with garbage.
    Upstream,
    /// The completion provider did not answer in time.
    Timeout,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Config => "CONFIG",
            ClientCode::Upstream => "UPSTREAM",
            ClientCode::Timeout => "TIMEOUT",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, BrainBytesError>;

/// Unified error type used by core, gateway and verify.
#[derive(Debug, Error)]
pub enum BrainBytesError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("upstream request timed out")]
    Timeout,
    #[error("internal: {0}")]
    Internal(String),
}

impl BrainBytesError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            BrainBytesError::BadRequest(_) => ClientCode::BadRequest,
            BrainBytesError::Config(_) => ClientCode::Config,
            BrainBytesError::Upstream(_) => ClientCode::Upstream,
            BrainBytesError::Timeout => ClientCode::Timeout,
            BrainBytesError::Internal(_) => ClientCode::Internal,
        }
    }
}
