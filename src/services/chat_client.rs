use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{
    config::PlannerConfig,
    error::{PlannerError, Result},
};

const MAX_RETRIES: usize = 3;
const SYSTEM_PROMPT: &str = "You are a travel planner. Reply with a single JSON object and nothing else.";

/// Anything that turns a prompt into free-form model text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// OpenAI-compatible `/chat/completions` client.
#[derive(Clone, Debug)]
pub struct ChatCompletionsClient {
    http: reqwest::Client,
    config: PlannerConfig,
}

impl ChatCompletionsClient {
    pub fn new(config: PlannerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| PlannerError::Http(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn request_body(&self, prompt: &str) -> Value {
        let mut body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt }
            ],
        });
        if let Some(max_tokens) = self.config.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        body
    }

    /// POST the body, retrying on 429 and 5xx with exponential backoff.
    pub async fn chat_completion(&self, body: &Value) -> Result<Value> {
        let url = self.config.chat_url();
        let mut attempt = 0;
        let mut backoff = Duration::from_millis(250);

        loop {
            let response = self
                .http
                .post(&url)
                .bearer_auth(&self.config.api_key)
                .json(body)
                .send()
                .await
                .map_err(|err| {
                    if err.is_timeout() {
                        PlannerError::Timeout(format!("chat completion timed out: {err}"))
                    } else {
                        PlannerError::Http(format!("request failed: {err}"))
                    }
                })?;

            let status = response.status();
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok())
                .map(Duration::from_secs);
            let response_text = response
                .text()
                .await
                .map_err(|err| PlannerError::Http(format!("failed to read response: {err}")))?;

            if status == StatusCode::TOO_MANY_REQUESTS {
                let wait = retry_after.unwrap_or(backoff);
                if attempt < MAX_RETRIES {
                    warn!(target: "tripplanner::http", attempt, ?wait, "rate limited, retrying");
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                    backoff *= 2;
                    continue;
                }
                return Err(PlannerError::RateLimit {
                    retry_after: wait.as_secs().max(1),
                });
            }

            if status.is_server_error() && attempt < MAX_RETRIES {
                warn!(target: "tripplanner::http", attempt, %status, "server error, retrying");
                tokio::time::sleep(backoff).await;
                attempt += 1;
                backoff *= 2;
                continue;
            }

            let response_json: Value = serde_json::from_str(&response_text).map_err(|err| {
                PlannerError::Http(format!("HTTP {status}: response is not JSON: {err}"))
            })?;

            if !status.is_success() {
                let api_message = response_json
                    .get("error")
                    .and_then(|error| error.get("message"))
                    .and_then(|value| value.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or(response_text);
                return Err(PlannerError::Http(format!("HTTP {status}: {api_message}")));
            }

            if let Some(error) = response_json.get("error") {
                let message = error
                    .get("message")
                    .and_then(|value| value.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| error.to_string());
                return Err(PlannerError::Http(format!("API error: {message}")));
            }

            return Ok(response_json);
        }
    }
}

/// Text content of the first choice of a chat completion response.
pub(crate) fn first_message_content(response: &Value) -> Result<String> {
    let message = response
        .get("choices")
        .and_then(|choices| choices.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .ok_or_else(|| {
            PlannerError::Unknown("completion response contained no message".to_string())
        })?;

    message
        .get("content")
        .and_then(|content| content.as_str())
        .map(|content| content.to_string())
        .ok_or_else(|| PlannerError::Unknown("completion message has no text content".to_string()))
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = self.request_body(prompt);
        debug!(target: "tripplanner::http", model = %self.config.model, "requesting completion");
        let response = self.chat_completion(&body).await?;
        first_message_content(&response)
    }
}
