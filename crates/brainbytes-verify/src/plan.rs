use std::time::Duration;

/// One endpoint that must come up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub url: String,
}

impl Target {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct VerifyPlan {
    pub targets: Vec<Target>,
    /// Rounds before giving up. Zero is treated as one.
    pub max_attempts: u32,
    /// Pause between rounds.
    pub delay: Duration,
}

impl Default for VerifyPlan {
    /// Frontend, backend and AI service on their local ports.
    fn default() -> Self {
        Self {
            targets: vec![
                Target::new("backend", "http://localhost:3001/"),
                Target::new("frontend", "http://localhost:3000/api/health"),
                Target::new("ai-service", "http://localhost:3002/health"),
            ],
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_DELAY,
        }
    }
}
