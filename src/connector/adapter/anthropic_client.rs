use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::connector::adapter::ChatClient;
use crate::domain::DomainError;

/// Default target: LM Studio running locally on its standard port.
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "http://localhost:1234";
const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_API_VERSION: &str = "2023-06-01";
/// Default model matches the LM Studio local-first default.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "ministral-3b-2512";
const MAX_TOKENS: u32 = 1024;

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// HTTP client for the Anthropic Messages API (and compatible endpoints such as
/// LM Studio).
///
/// **Local-first defaults**: targets LM Studio on `http://localhost:1234` without
/// an API key. Override via environment variables to target the Anthropic cloud:
///
/// ```text
/// ANTHROPIC_BASE_URL=https://api.anthropic.com
/// ANTHROPIC_API_KEY=sk-ant-...
/// ANTHROPIC_MODEL=claude-haiku-4-5
/// ```
///
/// Before each request the client sends a lightweight `HEAD /` probe with a
/// 2-second timeout. If the server isn't reachable the call fails immediately
/// instead of leaving the consultant pending for 30 s.
pub struct AnthropicClient {
    client: reqwest::Client,
    probe_client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + MESSAGES_PATH).
    url: String,
    /// Base URL used for the probe (e.g. `http://localhost:1234/`).
    base_url: String,
}

impl AnthropicClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let trimmed = base.trim_end_matches('/');
        let url = format!("{trimmed}{MESSAGES_PATH}");
        let base_url = format!("{trimmed}/");
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            probe_client: reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(2))
                .timeout(Duration::from_secs(2))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            url,
            base_url,
        }
    }

    /// Construct from environment variables with local-first defaults:
    ///
    /// | Variable             | Default                   | Purpose                   |
    /// |----------------------|---------------------------|---------------------------|
    /// | `ANTHROPIC_BASE_URL` | `http://localhost:1234`   | LM Studio / any server    |
    /// | `ANTHROPIC_MODEL`    | `ministral-3b-2512`       | Model in LM Studio        |
    /// | `ANTHROPIC_API_KEY`  | `""` (empty)              | Not required for local    |
    pub fn from_env() -> Self {
        let base = std::env::var("ANTHROPIC_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_ANTHROPIC_BASE_URL.to_string());
        let model = std::env::var("ANTHROPIC_MODEL")
            .unwrap_or_else(|_| DEFAULT_ANTHROPIC_MODEL.to_string());
        let key = std::env::var("ANTHROPIC_API_KEY").unwrap_or_default();
        Self::new(key, model, base)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Concatenate the text blocks of a Messages API response body.
    fn extract_text(body: &str) -> Result<String, DomainError> {
        let api_response: ApiResponse = serde_json::from_str(body).map_err(|e| {
            DomainError::advisory(format!("AnthropicClient: failed to parse response: {e}"))
        })?;

        let text: String = api_response
            .content
            .into_iter()
            .filter_map(|b| b.text)
            .collect();

        if text.trim().is_empty() {
            return Err(DomainError::advisory(
                "AnthropicClient: response has no text content",
            ));
        }

        Ok(text)
    }
}

#[async_trait]
impl ChatClient for AnthropicClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, DomainError> {
        // Any HTTP response to the probe, even 4xx/5xx, means the server is up.
        match self.probe_client.head(&self.base_url).send().await {
            Err(e) if e.is_connect() || e.is_timeout() => {
                warn!(
                    "AnthropicClient: server not reachable at {}: {e}",
                    self.base_url.trim_end_matches('/')
                );
                return Err(DomainError::advisory(format!(
                    "AnthropicClient: server not reachable at {}",
                    self.base_url.trim_end_matches('/')
                )));
            }
            _ => {}
        }

        let request = ApiRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![ApiMessage {
                role: "user",
                content: user,
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("AnthropicClient: request failed: {e}");
                DomainError::advisory(format!("AnthropicClient: request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("AnthropicClient: API returned {status}: {body}");
            return Err(DomainError::advisory(format!(
                "AnthropicClient: API returned {status}"
            )));
        }

        let body = response.text().await.map_err(|e| {
            DomainError::advisory(format!("AnthropicClient: failed to read response: {e}"))
        })?;

        Self::extract_text(&body)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
