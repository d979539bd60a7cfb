use std::time::Duration;

use crate::error::{PlannerError, Result};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "openai/gpt-4.1-mini";

/// Settings for the text-generation endpoint used to draft itineraries.
#[derive(Clone, Debug)]
pub struct PlannerConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub max_tokens: Option<u32>,
}

impl PlannerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(120),
            max_tokens: Some(4000),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Read `OPENAI_API_KEY`, `OPENAI_BASE_URL` / `OPENROUTER_BASE_URL` and
    /// `TRIP_PLANNER_MODEL` from the process environment.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            PlannerError::Config(
                "OPENAI_API_KEY environment variable must be set to draft itineraries"
                    .to_string(),
            )
        })?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) =
            std::env::var("OPENAI_BASE_URL").or_else(|_| std::env::var("OPENROUTER_BASE_URL"))
        {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("TRIP_PLANNER_MODEL") {
            config.model = model;
        }
        Ok(config)
    }

    /// Full chat completions endpoint derived from `base_url`.
    pub fn chat_url(&self) -> String {
        let trimmed = self.base_url.trim_end_matches('/');
        if trimmed.ends_with("/chat/completions") {
            trimmed.to_string()
        } else {
            format!("{}/chat/completions", trimmed)
        }
    }
}
