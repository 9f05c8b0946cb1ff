use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://slack.com/api";

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Slack API error: {0}")]
    Api(String),
}

#[derive(Debug, Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Minimal Web API client: posts bot replies with `chat.postMessage`.
#[derive(Clone)]
pub struct SlackClient {
    client: Client,
    bot_token: String,
    base_url: String,
}

impl SlackClient {
    /// # Errors
    ///
    /// Returns [`SlackError::Http`] if the HTTP client cannot be built.
    pub fn new(bot_token: &str) -> Result<Self, SlackError> {
        Self::with_base_url(bot_token, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(bot_token: &str, base_url: &str) -> Result<Self, SlackError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("leadmcp/0.1 (slack)")
            .build()?;
        Ok(Self {
            client,
            bot_token: bot_token.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Posts `text` to `channel`.
    ///
    /// # Errors
    ///
    /// [`SlackError::Http`] on transport failure, [`SlackError::Api`] when
    /// Slack answers `ok: false`.
    pub async fn post_message(&self, channel: &str, text: &str) -> Result<(), SlackError> {
        let response: ApiResponse = self
            .client
            .post(format!("{}/chat.postMessage", self.base_url))
            .bearer_auth(&self.bot_token)
            .json(&PostMessage { channel, text })
            .send()
            .await?
            .json()
            .await?;

        if response.ok {
            Ok(())
        } else {
            Err(SlackError::Api(
                response.error.unwrap_or_else(|| "unknown".to_owned()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn post_message_sends_channel_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat.postMessage"))
            .and(header("authorization", "Bearer xoxb-test"))
            .and(body_json(json!({ "channel": "C1", "text": "hello" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SlackClient::with_base_url("xoxb-test", &server.uri()).unwrap();
        client.post_message("C1", "hello").await.unwrap();
    }

    #[tokio::test]
    async fn post_message_surfaces_slack_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat.postMessage"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "ok": false, "error": "channel_not_found" })),
            )
            .mount(&server)
            .await;

        let client = SlackClient::with_base_url("xoxb-test", &server.uri()).unwrap();
        let err = client.post_message("C404", "hello").await.unwrap_err();
        assert_eq!(err.to_string(), "Slack API error: channel_not_found");
    }
}
