use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Apify API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("actor run {run_id} finished with status {status}")]
    RunFailed { run_id: String, status: String },

    #[error("actor run {run_id} returned no {what}")]
    MissingOutput { run_id: String, what: &'static str },

    #[error("actor run {run_id} still {status} after {attempts} status checks")]
    PollTimeout {
        run_id: String,
        status: String,
        attempts: u32,
    },

    #[error("actor run {run_id} wait was cancelled")]
    Cancelled { run_id: String },

    #[error("invalid actor id \"{0}\": expected owner/name")]
    InvalidActorId(String),

    #[error("invalid Apify base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("APIFY_TOKEN is not configured")]
    NotConfigured,
}
