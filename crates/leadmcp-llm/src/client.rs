//! HTTP client for OpenAI-compatible chat completions.
//!
//! Every call sends exactly two messages (system prompt, user message) and
//! returns the first choice's text. Transient failures are retried with
//! back-off; see [`crate::retry`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GatewayError;
use crate::retry::retry_with_backoff;
use crate::types::{
    ApiErrorEnvelope, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Longest error body snippet carried into [`GatewayError::Api`].
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Chat-completion client settings that do not change per call.
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_owned(),
            temperature: 0.3,
            timeout_secs: 60,
            max_retries: 2,
            backoff_base_ms: 500,
        }
    }
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
///
/// Use [`OpenAiClient::new`] for production or [`OpenAiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    settings: OpenAiSettings,
}

impl OpenAiClient {
    /// Creates a client pointed at the public OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, settings: OpenAiSettings) -> Result<Self, GatewayError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, settings)
    }

    /// Creates a client for a custom base URL (self-hosted gateways, wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`GatewayError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
        settings: OpenAiSettings,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("leadmcp/0.1 (intent-router)")
            .build()?;

        let endpoint = Self::completions_url(base_url)?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
            settings,
        })
    }

    /// Model name sent with each request.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Sends `system_prompt` + `user_message` and returns the reply text.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Api`] on a non-2xx status after retries.
    /// - [`GatewayError::Http`] on network failure after retries.
    /// - [`GatewayError::Deserialize`] if the body is not a completion.
    /// - [`GatewayError::EmptyResponse`] if no choice carries content.
    pub async fn ask(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, GatewayError> {
        let request = ChatCompletionRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
            temperature: self.settings.temperature,
        };

        let started = std::time::Instant::now();
        let completion = retry_with_backoff(
            self.settings.max_retries,
            self.settings.backoff_base_ms,
            || self.send(&request),
        )
        .await?;

        tracing::debug!(
            model = %self.settings.model,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "chat completion received"
        );

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GatewayError::EmptyResponse)
    }

    async fn send(
        &self,
        request: &ChatCompletionRequest<'_>,
    ) -> Result<ChatCompletionResponse, GatewayError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| GatewayError::Deserialize {
            context: "chat completion".to_owned(),
            source: e,
        })
    }

    /// Joins `base_url` and `chat/completions`, tolerating a trailing slash.
    fn completions_url(base_url: &str) -> Result<Url, GatewayError> {
        let joined = format!("{}/chat/completions", base_url.trim_end_matches('/'));
        Url::parse(&joined).map_err(|e| GatewayError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })
    }
}

/// Extracts `error.message` from an API error body, or a trimmed snippet of
/// the raw body when it is not the standard envelope.
fn error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(body) {
        return envelope.error.message;
    }
    body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completions_url_strips_trailing_slash() {
        let url = OpenAiClient::completions_url("https://api.openai.com/v1/").unwrap();
        assert_eq!(url.as_str(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn completions_url_rejects_garbage() {
        let err = OpenAiClient::completions_url("not a url").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn error_message_prefers_envelope() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(error_message(body), "Incorrect API key provided");
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("  upstream timeout \n"), "upstream timeout");
    }
}
