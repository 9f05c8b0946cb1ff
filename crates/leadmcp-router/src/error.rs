use leadmcp_leads::StoreError;
use leadmcp_llm::GatewayError;
use thiserror::Error;

/// Classifier output that is not a usable action descriptor.
#[derive(Debug, Error)]
pub enum ClassificationParseError {
    #[error("classifier output is not valid JSON: {source}")]
    InvalidJson {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("classifier output is not a JSON object")]
    NotAnObject { raw: String },

    #[error("classifier output has no \"action\" field")]
    MissingAction { raw: String },

    #[error("\"{action}\" descriptor is missing string field \"{field}\"")]
    MissingField {
        action: &'static str,
        field: &'static str,
    },
}

/// Anything that sends a message to the fallback path.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Classification(#[from] ClassificationParseError),

    #[error("classifier gateway failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("leads store failed: {0}")]
    Store(#[from] StoreError),
}

/// A collaborator client could not be constructed from configuration.
#[derive(Debug, Error)]
pub enum WiringError {
    #[error("LLM client: {0}")]
    Gateway(#[from] GatewayError),

    #[error("leads client: {0}")]
    Store(#[from] StoreError),

    #[error("Apify client: {0}")]
    Actor(#[from] leadmcp_apify::ActorError),
}
