use thiserror::Error;

/// Errors returned by the chat-completion gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("LLM API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The completion carried no choices or no message content.
    #[error("LLM returned an empty completion")]
    EmptyResponse,

    /// The configured base URL could not be parsed.
    #[error("invalid LLM base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
