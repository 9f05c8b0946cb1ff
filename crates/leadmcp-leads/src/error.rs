use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("leads query failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid date filter \"{value}\": expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("invalid Supabase URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
