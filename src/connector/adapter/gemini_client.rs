use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::connector::adapter::ChatClient;
use crate::domain::DomainError;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const API_VERSION_PATH: &str = "/v1beta/models";
const TEMPERATURE: f32 = 0.4;
const MAX_OUTPUT_TOKENS: u32 = 1024;

/// Gemini `generateContent` request payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Instruction<'a>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Instruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

/// Subset of the `generateContent` response we read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// HTTP client for the Google Gemini `generateContent` API.
///
/// Configuration comes from the environment:
///
/// | Variable          | Default                                     |
/// |-------------------|---------------------------------------------|
/// | `GEMINI_API_KEY`  | required                                    |
/// | `GEMINI_MODEL`    | `gemini-2.5-flash`                          |
/// | `GEMINI_BASE_URL` | `https://generativelanguage.googleapis.com` |
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let api_key: String = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DomainError::configuration("GEMINI_API_KEY is not set"));
        }

        let model: String = model.into();
        let base: String = base_url.into();
        let url = format!(
            "{}{API_VERSION_PATH}/{model}:generateContent",
            base.trim_end_matches('/')
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DomainError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            model,
            url,
        })
    }

    pub fn from_env() -> Result<Self, DomainError> {
        let key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());
        let base = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());
        Self::new(key, model, base)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn build_request<'a>(system: &'a str, user: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: user }],
            }],
            system_instruction: Instruction {
                parts: vec![Part { text: system }],
            },
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }

    /// Text of the first candidate, parts concatenated.
    fn extract_text(body: &str) -> Result<String, DomainError> {
        let response: GenerateResponse = serde_json::from_str(body).map_err(|e| {
            DomainError::advisory(format!("GeminiClient: failed to parse response: {e}"))
        })?;

        if let Some(reason) = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            return Err(DomainError::advisory(format!(
                "GeminiClient: prompt blocked ({reason})"
            )));
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::advisory("GeminiClient: response has no candidates"))?;

        if let Some(reason) = candidate.finish_reason.as_deref() {
            debug!("GeminiClient: finish reason {reason}");
        }

        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.trim().is_empty() {
            return Err(DomainError::advisory(
                "GeminiClient: candidate has no text content",
            ));
        }

        Ok(text)
    }
}

#[async_trait]
impl ChatClient for GeminiClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, DomainError> {
        let request = Self::build_request(system, user);

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("GeminiClient: request failed: {e}");
                DomainError::advisory(format!("GeminiClient: request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("GeminiClient: API returned {status}: {body}");
            return Err(DomainError::advisory(format!(
                "GeminiClient: API returned {status}"
            )));
        }

        let body = response.text().await.map_err(|e| {
            DomainError::advisory(format!("GeminiClient: failed to read response: {e}"))
        })?;

        Self::extract_text(&body).inspect_err(|e| warn!("{e}"))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_requires_api_key() {
        let err = GeminiClient::new("  ", DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_BASE_URL)
            .err()
            .unwrap();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn new_builds_generate_content_url() {
        let client =
            GeminiClient::new("key", "gemini-2.5-flash", "https://example.test/").unwrap();
        assert_eq!(
            client.url(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn request_uses_camel_case_fields() {
        let request = GeminiClient::build_request("eres un consultor", "¿clase 25?");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "¿clase 25?");
        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "eres un consultor"
        );
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1024);
    }

    #[test]
    fn extract_text_reads_first_candidate() {
        let body = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Sí, es viable "}, {"text": "tras una búsqueda fonética."}]}, "finishReason": "STOP"},
                {"content": {"role": "model", "parts": [{"text": "otra"}]}}
            ]
        }"#;
        assert_eq!(
            GeminiClient::extract_text(body).unwrap(),
            "Sí, es viable tras una búsqueda fonética."
        );
    }

    #[test]
    fn extract_text_rejects_blocked_prompt() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let err = GeminiClient::extract_text(body).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn extract_text_rejects_missing_candidates() {
        assert!(GeminiClient::extract_text(r#"{"candidates": []}"#).is_err());
        assert!(GeminiClient::extract_text(r#"{"candidates": [{"finishReason": "MAX_TOKENS"}]}"#).is_err());
    }
}
