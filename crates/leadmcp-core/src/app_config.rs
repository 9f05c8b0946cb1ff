use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub openai_temperature: f32,
    pub llm_request_timeout_secs: u64,
    pub llm_max_retries: u32,
    pub llm_retry_backoff_base_ms: u64,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_leads_table: String,
    pub apify_token: Option<String>,
    pub apify_base_url: String,
    pub apify_actor_id: String,
    pub apify_poll_interval_secs: u64,
    pub apify_max_poll_attempts: u32,
    pub slack_bot_token: Option<String>,
    pub slack_signing_secret: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("openai_api_key", &"[redacted]")
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .field("openai_temperature", &self.openai_temperature)
            .field("llm_request_timeout_secs", &self.llm_request_timeout_secs)
            .field("llm_max_retries", &self.llm_max_retries)
            .field("llm_retry_backoff_base_ms", &self.llm_retry_backoff_base_ms)
            .field("supabase_url", &self.supabase_url)
            .field("supabase_anon_key", &"[redacted]")
            .field("supabase_leads_table", &self.supabase_leads_table)
            .field(
                "apify_token",
                &self.apify_token.as_ref().map(|_| "[redacted]"),
            )
            .field("apify_base_url", &self.apify_base_url)
            .field("apify_actor_id", &self.apify_actor_id)
            .field("apify_poll_interval_secs", &self.apify_poll_interval_secs)
            .field("apify_max_poll_attempts", &self.apify_max_poll_attempts)
            .field(
                "slack_bot_token",
                &self.slack_bot_token.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "slack_signing_secret",
                &self.slack_signing_secret.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
